//! Database models

pub mod app_setting;
pub mod employee;
pub mod serde_helpers;
pub mod time_record;

pub use app_setting::{AppSetting, AppSettingWrite, SettingKind};
pub use employee::{AuthIdentity, Employee, EmployeeCreate, EmployeeId, EmployeeUpdate, Role};
pub use time_record::{
    RecordKind, RecordOrigin, TimeRecord, TimeRecordCreate, TimeRecordId, TimeRecordUpdate,
};
