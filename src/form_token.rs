use uuid::Uuid;

/// Token embedded in the upload form and expected back on submit.
///
/// It is derived from the configured secret and a nonce drawn at startup, so
/// a restart invalidates forms rendered by the previous process.
pub struct FormToken(String);

impl FormToken {
    pub fn generate(secret_key: &str) -> FormToken {
        let nonce = Uuid::new_v4();
        let name = format!("{}:{}", secret_key, nonce);
        let token = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
        FormToken(token.simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn verify(&self, submitted: Option<&str>) -> bool {
        let Some(submitted) = submitted else {
            return false;
        };
        let expected = self.0.as_bytes();
        let submitted = submitted.as_bytes();
        if expected.len() != submitted.len() {
            return false;
        }
        // Compare every byte regardless of where the first mismatch is
        expected.iter().zip(submitted).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }
}
