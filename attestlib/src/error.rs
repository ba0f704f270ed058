// SPDX-License-Identifier: Apache-2.0 or MIT

//! Structured status codes. A status carries a severity and a source-scoped
//! code so callers can tell a malformed peer message from a local fault
//! without string matching.

use core::fmt;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusSeverity {
    SUCCESS = 0,
    ERROR = 8,
}

impl Default for StatusSeverity {
    fn default() -> Self {
        Self::ERROR
    }
}

#[repr(u16)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCodeCore {
    INVALID_PARAMETER = 1,
    UNSUPPORTED_CAP = 2,
    INVALID_STATE_LOCAL = 3,
    INVALID_STATE_PEER = 4,
    INVALID_MSG_FIELD = 5,
    INVALID_MSG_SIZE = 6,
    ERROR_PEER = 10,
    BUFFER_FULL = 12,
    BUFFER_TOO_SMALL = 13,
}

impl Default for StatusCodeCore {
    fn default() -> Self {
        Self::INVALID_PARAMETER
    }
}

#[repr(u16)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCodeCrypto {
    CRYPTO_ERROR = 0,
    VERIF_FAIL = 1,
}

impl Default for StatusCodeCrypto {
    fn default() -> Self {
        Self::CRYPTO_ERROR
    }
}

#[repr(u16)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCodeMeasCollect {
    MEAS_INTERNAL_ERROR = 1,
}

impl Default for StatusCodeMeasCollect {
    fn default() -> Self {
        Self::MEAS_INTERNAL_ERROR
    }
}

#[repr(u16)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCodeRng {
    LOW_ENTROPY = 0,
}

impl Default for StatusCodeRng {
    fn default() -> Self {
        Self::LOW_ENTROPY
    }
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCode {
    SUCCESS,
    CORE(StatusCodeCore),
    CRYPTO(StatusCodeCrypto),
    MEAS_COLLECT(StatusCodeMeasCollect),
    RNG(StatusCodeRng),
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::CORE(StatusCodeCore::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AttestStatus {
    pub severity: StatusSeverity,
    pub status_code: StatusCode,
}

impl AttestStatus {
    pub fn is_success(&self) -> bool {
        self.severity == StatusSeverity::SUCCESS
    }

    pub fn is_error(&self) -> bool {
        self.severity == StatusSeverity::ERROR
    }
}

impl fmt::Display for AttestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Severity: {:?}, Status: {:?}",
            self.severity, self.status_code
        )
    }
}

#[macro_export]
macro_rules! attest_return_status {
    ($severity:expr, $status_code:expr) => {
        AttestStatus {
            severity: $severity,
            status_code: $status_code,
        }
    };
}

pub use attest_return_status;

/* - Core Errors - */

/* The function input parameter is invalid. */
pub const ATTEST_STATUS_INVALID_PARAMETER: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::INVALID_PARAMETER)
);

/* Unable to complete operation due to unsupported capabilities by either the
 * caller, the peer, or both. */
pub const ATTEST_STATUS_UNSUPPORTED_CAP: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::UNSUPPORTED_CAP)
);

/* Unable to complete operation due to caller's state. */
pub const ATTEST_STATUS_INVALID_STATE_LOCAL: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::INVALID_STATE_LOCAL)
);

/* Unable to complete operation due to peer's state. */
pub const ATTEST_STATUS_INVALID_STATE_PEER: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::INVALID_STATE_PEER)
);

/* The received message contains one or more invalid message fields. */
pub const ATTEST_STATUS_INVALID_MSG_FIELD: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::INVALID_MSG_FIELD)
);

/* The received message's size is invalid. */
pub const ATTEST_STATUS_INVALID_MSG_SIZE: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::INVALID_MSG_SIZE)
);

/* Received an unexpected error message. */
pub const ATTEST_STATUS_ERROR_PEER: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::ERROR_PEER)
);

/* Unable to append new data to buffer due to resource exhaustion. */
pub const ATTEST_STATUS_BUFFER_FULL: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::BUFFER_FULL)
);

/* Unable to return data because caller does not provide big enough buffer. */
pub const ATTEST_STATUS_BUFFER_TOO_SMALL: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CORE(StatusCodeCore::BUFFER_TOO_SMALL)
);

/* - Cryptography Errors - */

/* Generic failure originating from the cryptography module. */
pub const ATTEST_STATUS_CRYPTO_ERROR: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CRYPTO(StatusCodeCrypto::CRYPTO_ERROR)
);

/* Verification of the provided signature failed. */
pub const ATTEST_STATUS_VERIF_FAIL: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::CRYPTO(StatusCodeCrypto::VERIF_FAIL)
);

/* - Measurement Collection Errors - */

/* Unable to produce a measurement summary because of internal error. */
pub const ATTEST_STATUS_MEAS_INTERNAL_ERROR: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::MEAS_COLLECT(StatusCodeMeasCollect::MEAS_INTERNAL_ERROR)
);

/* - Random Number Generation Errors - */

/* Unable to produce random number due to lack of entropy. */
pub const ATTEST_STATUS_LOW_ENTROPY: AttestStatus = attest_return_status!(
    StatusSeverity::ERROR,
    StatusCode::RNG(StatusCodeRng::LOW_ENTROPY)
);

pub type AttestResult<T = ()> = core::result::Result<T, AttestStatus>;
