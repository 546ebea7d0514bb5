pub mod observation;
pub mod variable;
