// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::common::{AttestConfigInfo, AttestContext, AttestProvisionInfo};
use crate::error::AttestResult;

pub struct RequesterContext {
    pub common: AttestContext,
}

impl RequesterContext {
    pub fn new(
        config_info: AttestConfigInfo,
        provision_info: AttestProvisionInfo,
    ) -> AttestResult<Self> {
        Ok(RequesterContext {
            common: AttestContext::new(config_info, provision_info)?,
        })
    }
}
