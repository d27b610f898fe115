use shadow_rs::ShadowBuilder;

fn main() {
    // Version metadata for `--version` and the application settings
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
