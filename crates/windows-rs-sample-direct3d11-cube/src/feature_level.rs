use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureLevel {
    Level9_1,
    Level9_2,
    Level9_3,
    Level10_0,
    Level10_1,
    Level11_0,
    Level11_1,
}

/// Newest first. Device creation takes the first one the driver accepts.
pub const REQUESTED_FEATURE_LEVELS: [FeatureLevel; 7] = [
    FeatureLevel::Level11_1,
    FeatureLevel::Level11_0,
    FeatureLevel::Level10_1,
    FeatureLevel::Level10_0,
    FeatureLevel::Level9_3,
    FeatureLevel::Level9_2,
    FeatureLevel::Level9_1,
];

impl std::fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureLevel::Level9_1 => "9.1",
            FeatureLevel::Level9_2 => "9.2",
            FeatureLevel::Level9_3 => "9.3",
            FeatureLevel::Level10_0 => "10.0",
            FeatureLevel::Level10_1 => "10.1",
            FeatureLevel::Level11_0 => "11.0",
            FeatureLevel::Level11_1 => "11.1",
        };
        f.write_str(name)
    }
}

/// Calls `create` with the full list, and once more without its first entry
/// if the first call was rejected as an invalid argument. Drivers that
/// predate 11.1 reject the whole list when it contains that level.
///
/// There is never a third attempt.
pub fn negotiate<T, E>(
    levels: &[FeatureLevel],
    is_invalid_argument: impl Fn(&E) -> bool,
    mut create: impl FnMut(&[FeatureLevel]) -> Result<T, E>,
) -> Result<T, E> {
    match create(levels) {
        Err(e) if is_invalid_argument(&e) && levels.len() > 1 => {
            warn!(
                "Feature level list starting at {} was rejected, retrying from {}",
                levels[0], levels[1]
            );
            create(&levels[1..])
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum FakeError {
        InvalidArgument,
        Unsupported,
    }

    fn attempt_log(
        outcomes: Vec<Result<FeatureLevel, FakeError>>,
    ) -> (Result<FeatureLevel, FakeError>, Vec<Vec<FeatureLevel>>) {
        let mut outcomes = outcomes.into_iter();
        let mut attempts = Vec::new();
        let result = negotiate(
            &REQUESTED_FEATURE_LEVELS,
            |e: &FakeError| *e == FakeError::InvalidArgument,
            |levels| {
                attempts.push(levels.to_vec());
                outcomes.next().expect("unexpected extra attempt")
            },
        );
        (result, attempts)
    }

    #[test]
    fn accepted_first_list_makes_one_attempt() {
        let (result, attempts) = attempt_log(vec![Ok(FeatureLevel::Level11_1)]);
        assert_eq!(result, Ok(FeatureLevel::Level11_1));
        assert_eq!(attempts, vec![REQUESTED_FEATURE_LEVELS.to_vec()]);
    }

    #[test]
    fn invalid_argument_retries_without_the_first_level() {
        let (result, attempts) = attempt_log(vec![
            Err(FakeError::InvalidArgument),
            Ok(FeatureLevel::Level11_0),
        ]);
        assert_eq!(result, Ok(FeatureLevel::Level11_0));
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[1], REQUESTED_FEATURE_LEVELS[1..].to_vec());
    }

    #[test]
    fn second_failure_is_reported_without_a_third_attempt() {
        let (result, attempts) = attempt_log(vec![
            Err(FakeError::InvalidArgument),
            Err(FakeError::InvalidArgument),
        ]);
        assert_eq!(result, Err(FakeError::InvalidArgument));
        assert_eq!(attempts.len(), 2);
    }

    #[test]
    fn other_failures_are_not_retried() {
        let (result, attempts) = attempt_log(vec![Err(FakeError::Unsupported)]);
        assert_eq!(result, Err(FakeError::Unsupported));
        assert_eq!(attempts.len(), 1);
    }

    #[test]
    fn levels_display_as_version_numbers() {
        assert_eq!(FeatureLevel::Level10_1.to_string(), "10.1");
        assert!(FeatureLevel::Level11_1 > FeatureLevel::Level9_3);
    }
}
