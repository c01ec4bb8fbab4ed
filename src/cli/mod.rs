// Command-line surface of the `el-hornito` binary.

// Top-level parser, subcommands and their options.
pub mod cmd_enums;
// Typed values accepted by individual options.
pub mod type_enums;
