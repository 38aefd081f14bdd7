//! cici - keep CI secrets encrypted in source control.
//!
//! Secret files listed in `.cici.yml` are staged under a secrets directory,
//! packed into one tar archive, and encrypted with AES-256-CBC into
//! `secrets.tar.enc`, which is committed. On CI the key and IV come from
//! `CICI_DECRYPT_KEY` / `CICI_DECRYPT_IV`, the archive is decrypted and
//! unpacked, and one set of secrets is copied back into place.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Pack + encrypt, report credentials
//! │   ├── decrypt       # Decrypt + restore a set
//! │   ├── prompt        # Operator key/iv prompt
//! │   ├── output        # Styled terminal output
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .cici.yml schema and validation
//!     ├── sets          # Secret set resolution
//!     ├── key           # Key material and reuse verification
//!     ├── cipher        # AES-256-CBC
//!     ├── archive       # Archiver trait, tar backend
//!     ├── gitignore     # .gitignore merging
//!     └── project/      # Encrypt and decrypt pipelines
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::project::Project;
