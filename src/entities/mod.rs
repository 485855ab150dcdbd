//! Entity module - SeaORM definitions for the hosted store's tables.
//! The console only ever reads these; statuses and figures are kept as loose
//! as the store delivers them and tightened later by normalization.

pub mod parent;
pub mod payment;
pub mod platform_integration;
pub mod school;
pub mod school_user;
pub mod staff;
pub mod student;
pub mod student_teacher;
pub mod teacher;
pub mod user_action;

// Entity aliases used by queries and schema creation
pub use parent::Entity as Parent;
pub use payment::Entity as Payment;
pub use platform_integration::Entity as PlatformIntegration;
pub use school::Entity as School;
pub use school_user::Entity as SchoolUser;
pub use staff::Entity as Staff;
pub use student::Entity as Student;
pub use student_teacher::Entity as StudentTeacher;
pub use teacher::Entity as Teacher;
pub use user_action::Entity as UserAction;
