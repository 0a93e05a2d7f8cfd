mod add_on;
mod catalog;
mod contact;
mod motor_category;
mod quote_result;
mod quote_selection;
mod service_option;

pub use add_on::AddOnOption;
pub use catalog::Catalog;
pub use contact::ContactConfig;
pub use motor_category::MotorCategoryOption;
pub use quote_result::{QuoteResult, QuoteState};
pub use quote_selection::QuoteSelection;
pub use service_option::ServiceOption;
