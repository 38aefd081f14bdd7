//! Test fixtures and constants.

use std::cell::RefCell;

use cici::core::key::{KeyMaterial, KeyPrompt};
use cici::error::Result;

/// Default set plus one named set with its own secrets.
pub const BASIC_CONFIG: &str = r#"
path: sec
default:
  secrets:
    - a.txt
sets:
  prod:
    secrets:
      - b.txt
"#;

/// Default secrets inherited by a set with no body and one with a path override.
pub const INHERITING_CONFIG: &str = r#"
default:
  secrets:
    - .env
    - config/app.json
sets:
  staging:
  production:
    path: prod
"#;

/// Secrets staged under `sec/` for [`BASIC_CONFIG`].
pub const BASIC_FILES: &[(&str, &str)] = &[
    ("sec/a.txt", "default secret"),
    ("sec/prod/b.txt", "production secret"),
];

/// Pair used as "the previous key" where a test needs a known archive.
pub fn known_key() -> KeyMaterial {
    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    for (i, b) in key.iter_mut().enumerate() {
        *b = i as u8;
    }
    for (i, b) in iv.iter_mut().enumerate() {
        *b = i as u8;
    }
    KeyMaterial::new(key, iv)
}

/// A pair known to fail padding against archives written with [`known_key`].
pub fn wrong_key() -> KeyMaterial {
    KeyMaterial::new([0xaa; 32], [0xbb; 16])
}

/// Prompt that must never be asked.
pub struct NoPrompt;

impl KeyPrompt for NoPrompt {
    fn ask(&self, label: &str) -> Result<String> {
        panic!("unexpected prompt: {}", label);
    }
}

/// Prompt answering with a fixed key, then IV.
pub struct ScriptedPrompt {
    answers: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(key: &KeyMaterial) -> Self {
        Self {
            answers: RefCell::new(vec![key.iv_base64(), key.key_base64()]),
        }
    }
}

impl KeyPrompt for ScriptedPrompt {
    fn ask(&self, _label: &str) -> Result<String> {
        Ok(self
            .answers
            .borrow_mut()
            .pop()
            .expect("prompt asked more than twice"))
    }
}
