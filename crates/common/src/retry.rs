use std::time::Duration;

/// Retry a fallible operation with exponential backoff.
///
/// The delay doubles after each failed attempt, starting at `base_delay_ms`.
/// The final error is returned once `max_retries` attempts are exhausted.
pub fn retry_with_backoff<F, T, E>(
    mut f: F,
    max_retries: u32,
    base_delay_ms: u64,
    operation_name: &str,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    for attempt in 0..max_retries {
        match f() {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt < max_retries - 1 {
                    let delay_ms = base_delay_ms * 2_u64.pow(attempt);
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {}ms...",
                        operation_name,
                        attempt + 1,
                        max_retries,
                        e,
                        delay_ms
                    );
                    std::thread::sleep(Duration::from_millis(delay_ms));
                } else {
                    tracing::error!(
                        "{} failed after {} attempts: {}",
                        operation_name,
                        max_retries,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeds_on_first_attempt() {
        let result: Result<u32, &str> = retry_with_backoff(|| Ok(7), 3, 1, "test op");
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result: Result<u32, &str> = retry_with_backoff(
            || {
                calls += 1;
                if calls < 3 { Err("not yet") } else { Ok(calls) }
            },
            5,
            1,
            "test op",
        );
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn returns_last_error_when_exhausted() {
        let result: Result<u32, &str> = retry_with_backoff(|| Err("broken"), 3, 1, "test op");
        assert_eq!(result, Err("broken"));
    }
}
