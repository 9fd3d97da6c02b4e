//! Error shared by every backend API port.

use super::define_port_error;

define_port_error! {
    /// Failure of one backend API call.
    ///
    /// `Status` displays only the normalised server message so it can be
    /// shown to the operator unchanged.
    pub enum ApiError {
        /// The request never produced a response.
        Transport { message: String } =>
            "network request failed: {message}",
        /// The backend answered with a non-success status.
        Status { status: u16, message: String } => "{message}",
        /// A success response carried an unexpected body.
        Decode { message: String } =>
            "unexpected response from the backend: {message}",
    }
}
