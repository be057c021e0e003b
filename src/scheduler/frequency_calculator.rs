use time::{Duration, OffsetDateTime};
use twinprobe_types::scheduler::{Frequency, FrequencyUnit};

/// Error signaled for a non-positive cadence value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("frequency value must be a positive integer")]
pub struct InvalidFrequencyError;

/// Returns the next due time for the specified cadence: `reference` advanced by exactly
/// `frequency.value` units of `frequency.unit`. The reference is the registration time
/// for the first occurrence and the due time that just fired for every subsequent one,
/// so the cadence never drifts by the execution duration.
pub fn next_due(
    frequency: Frequency,
    reference: OffsetDateTime,
) -> Result<OffsetDateTime, InvalidFrequencyError> {
    if frequency.value == 0 {
        return Err(InvalidFrequencyError);
    }

    let value = i64::from(frequency.value);
    let interval = match frequency.unit {
        FrequencyUnit::Minutes => Duration::minutes(value),
        FrequencyUnit::Hours => Duration::hours(value),
        FrequencyUnit::Days => Duration::days(value),
    };

    Ok(reference + interval)
}

#[cfg(test)]
mod tests {
    use super::{next_due, InvalidFrequencyError};
    use time::OffsetDateTime;
    use twinprobe_types::scheduler::{Frequency, FrequencyUnit};

    #[test]
    fn advances_reference_by_exactly_the_cadence() -> anyhow::Result<()> {
        let reference = OffsetDateTime::from_unix_timestamp(946720800)?;

        assert_eq!(
            next_due(
                Frequency {
                    unit: FrequencyUnit::Minutes,
                    value: 30
                },
                reference
            )?,
            OffsetDateTime::from_unix_timestamp(946720800 + 30 * 60)?
        );
        assert_eq!(
            next_due(
                Frequency {
                    unit: FrequencyUnit::Hours,
                    value: 24
                },
                reference
            )?,
            OffsetDateTime::from_unix_timestamp(946720800 + 24 * 3600)?
        );
        assert_eq!(
            next_due(
                Frequency {
                    unit: FrequencyUnit::Days,
                    value: 7
                },
                reference
            )?,
            OffsetDateTime::from_unix_timestamp(946720800 + 7 * 86400)?
        );

        Ok(())
    }

    #[test]
    fn is_strictly_increasing_for_positive_values() -> anyhow::Result<()> {
        let reference = OffsetDateTime::from_unix_timestamp(946720800)?;
        for unit in [
            FrequencyUnit::Minutes,
            FrequencyUnit::Hours,
            FrequencyUnit::Days,
        ] {
            for value in [1, 2, 15, 60, 1440] {
                assert!(next_due(Frequency { unit, value }, reference)? > reference);
            }
        }

        Ok(())
    }

    #[test]
    fn rejects_zero_value() -> anyhow::Result<()> {
        let reference = OffsetDateTime::from_unix_timestamp(946720800)?;
        for unit in [
            FrequencyUnit::Minutes,
            FrequencyUnit::Hours,
            FrequencyUnit::Days,
        ] {
            assert_eq!(
                next_due(Frequency { unit, value: 0 }, reference),
                Err(InvalidFrequencyError)
            );
        }

        Ok(())
    }
}
