// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestConfigInfo, AttestContext, AttestProvisionInfo};
use crate::error::AttestResult;

pub struct ResponderContext {
    pub common: AttestContext,
}

impl ResponderContext {
    pub fn new(
        config_info: AttestConfigInfo,
        provision_info: AttestProvisionInfo,
    ) -> AttestResult<Self> {
        Ok(ResponderContext {
            common: AttestContext::new(config_info, provision_info)?,
        })
    }
}
