//! TypeScript target profile.
//!
//! Renders two-space indented TypeScript with same-line braces, relative-path
//! `import { ... } from "./x";` statements, and decorator attributes. Records
//! and structs come out as interfaces; enums as `export enum`.

mod profile;

pub use profile::TypeScriptProfile;
