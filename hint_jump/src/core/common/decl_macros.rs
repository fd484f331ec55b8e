// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Syntactic sugar for `Ok(())` and `Ok($value)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Wrap the given block or stmt so that it returns a `Result<()>`. It is just syntactic
/// sugar that helps having to write `Ok(())` repeatedly at the end of each block.
#[macro_export]
macro_rules! throws {
    ($it: block) => {{
        $it
        return Ok(())
    }};
    ($it: stmt) => {{
        $it
        return Ok(())
    }};
}
