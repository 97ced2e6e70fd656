pub mod add_employee_cmd;
pub mod get_employee_cmd;
pub mod login_cmd;
pub mod on_duty_cmd;
pub mod record_work_date_cmd;
