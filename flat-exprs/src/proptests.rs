//! Property-based tests for the encoding, the expression vector and the
//! normal-form bridge.
