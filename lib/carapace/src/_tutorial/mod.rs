//! # Tutorial: Declarative Requests with carapace
//!
//! Learn to turn plain structs into outbound HTTP requests step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first RPC object
//! 2. [Fragments & Queries][chapter_1] - URI templates, query fields, naming
//! 3. [Bodies][chapter_2] - Serializers, strict mode and failures
//! 4. [Preprocessors & Diagnostics][chapter_3] - Validation, headers, soft failures
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
