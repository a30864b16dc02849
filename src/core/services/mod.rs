pub mod form_controller;
pub mod list_controller;

#[cfg(test)]
pub mod test_support;
