mod employee;
mod page;
mod point;

pub use employee::{
    Employee, EmployeeCandidate, EmployeeChanges, EmployeeDetail, EmployeeFilter,
    EmployeeQuery, EmployeeStatistics, EmployeeStatus, Gender, NO_DEPARTMENT_LABEL, NewEmployee,
    UNKNOWN_STATUS_LABEL,
};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use point::{NewPoint, Point};
