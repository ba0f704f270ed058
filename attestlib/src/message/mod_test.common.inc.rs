// SPDX-License-Identifier: Apache-2.0 or MIT

#[allow(unused, unused_mut)]
macro_rules! create_attest_context {
    ($context_name: ident) => {
        let config_info = AttestConfigInfo::default();
        let provision_info = AttestProvisionInfo::default();
        #[allow(unused, unused_mut)]
        let mut $context_name = AttestContext::new(config_info, provision_info).unwrap();
    };
}

#[allow(unused)]
pub(crate) use create_attest_context;
