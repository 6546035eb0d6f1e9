use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensionError {
    #[error("No series provided for weighted component '{0}'")]
    UnknownComponent(String),

    #[error("Series '{0}' carries no weight in the composite")]
    UnweightedComponent(String),
}
