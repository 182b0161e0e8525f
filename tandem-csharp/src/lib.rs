//! C# target profile.
//!
//! Renders four-space indented C# with next-line braces, `using` directives
//! for cross-namespace references, namespace blocks, auto-properties, and
//! bracketed attributes. Collection and awaitable wrappers map onto
//! `List<T>`, `Dictionary<K, V>` and `Task<T>`; the generated code assumes
//! implicit usings for those.

mod profile;

pub use profile::CSharpProfile;
