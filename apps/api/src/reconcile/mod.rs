pub mod extract;
pub mod prompts;
pub mod reconciler;
pub mod validator;
