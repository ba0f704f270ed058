// SPDX-License-Identifier: Apache-2.0 or MIT

mod secret_callback;

use conquer_once::spin::OnceCell;
pub use secret_callback::{AttestSecretAsymSign, AttestSecretMeasurement};

static SECRET_ASYM_INSTANCE: OnceCell<AttestSecretAsymSign> = OnceCell::uninit();
static SECRET_MEASUREMENT_INSTANCE: OnceCell<AttestSecretMeasurement> = OnceCell::uninit();

pub mod asym_sign {
    use super::SECRET_ASYM_INSTANCE;
    use crate::protocol::{AttestBaseAsymAlgo, AttestBaseHashAlgo, AttestSignatureStruct};
    use crate::secret::AttestSecretAsymSign;

    pub fn register(context: AttestSecretAsymSign) -> bool {
        SECRET_ASYM_INSTANCE.try_init_once(|| context).is_ok()
    }

    static DEFAULT: AttestSecretAsymSign = AttestSecretAsymSign {
        sign_cb: |_base_hash_algo: AttestBaseHashAlgo,
                  _base_asym_algo: AttestBaseAsymAlgo,
                  _data: &[u8]|
         -> Option<AttestSignatureStruct> { unimplemented!() },
    };

    pub fn sign(
        base_hash_algo: AttestBaseHashAlgo,
        base_asym_algo: AttestBaseAsymAlgo,
        data: &[u8],
    ) -> Option<AttestSignatureStruct> {
        (SECRET_ASYM_INSTANCE
            .try_get_or_init(|| DEFAULT.clone())
            .ok()?
            .sign_cb)(base_hash_algo, base_asym_algo, data)
    }
}

pub mod measurement {
    use super::SECRET_MEASUREMENT_INSTANCE;
    use crate::protocol::{AttestBaseHashAlgo, AttestDigestStruct, AttestVersion};
    use crate::secret::AttestSecretMeasurement;

    pub fn register(context: AttestSecretMeasurement) -> bool {
        SECRET_MEASUREMENT_INSTANCE.try_init_once(|| context).is_ok()
    }

    static DEFAULT: AttestSecretMeasurement = AttestSecretMeasurement {
        generate_measurement_summary_hash_cb: |_version: AttestVersion,
                                               _base_hash_algo: AttestBaseHashAlgo|
         -> Option<AttestDigestStruct> { unimplemented!() },
    };

    pub fn generate_measurement_summary_hash(
        version: AttestVersion,
        base_hash_algo: AttestBaseHashAlgo,
    ) -> Option<AttestDigestStruct> {
        (SECRET_MEASUREMENT_INSTANCE
            .try_get_or_init(|| DEFAULT.clone())
            .ok()?
            .generate_measurement_summary_hash_cb)(version, base_hash_algo)
    }
}
