pub mod expand;
pub mod expression;
pub mod gates;
pub mod interpolate;
pub mod processor;
pub mod validator;
pub mod value;


#[cfg(test)]
mod tests_processor;

#[cfg(test)]
mod tests_expansion;


pub use expand::{detect, expand, ExpansionShape};
pub use expression::{evaluate, MAX_EVAL_DEPTH};
pub use gates::admits;
pub use interpolate::{interpolate, MAX_TEMPLATE_DEPTH};
pub use processor::{RenderError, TreeProcessor};
pub use validator::{ValidationLevel, ValidationWarning, Validator};
pub use value::Value;
