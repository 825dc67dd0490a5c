use crate::ImageError;
use byte_unit::Byte;
use vdisk::VDiskError;

/// Multiplier applied to a bare size number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
}

impl SizeUnit {
    /// Accepts `b`, `k` and `m` in any case.
    pub fn from_name(name: &str) -> Option<Self> {
        return match name.trim().to_ascii_lowercase().as_str() {
            "b" => Some(SizeUnit::Bytes),
            "k" => Some(SizeUnit::Kilobytes),
            "m" => Some(SizeUnit::Megabytes),
            _ => None,
        };
    }

    pub fn multiplier(&self) -> u64 {
        return match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kilobytes => 1024,
            SizeUnit::Megabytes => 1024 * 1024,
        };
    }
}

/// Converts a size argument to bytes. A bare number is scaled by `unit`, or by `default_unit` when
/// no unit was given. A number carrying its own suffix (`200KiB`) is read as is and cannot be
/// combined with a unit.
pub fn parse_size(
    value: &str,
    unit: Option<&str>,
    default_unit: SizeUnit,
) -> Result<u64, VDiskError<ImageError>> {
    let value = value.trim();

    let unit = match unit {
        Some(u) => match SizeUnit::from_name(u) {
            Some(u) => Some(u),
            None => return Err(VDiskError::InvalidArgument(format!("unknown unit \"{}\"", u))),
        },
        None => None,
    };

    let bytes = match value.parse::<i128>() {
        Ok(n) if n <= 0 => {
            return Err(VDiskError::InvalidArgument(
                "size must be greater than 0".to_string(),
            ))
        }
        Ok(n) => {
            let multiplier = unit.unwrap_or(default_unit).multiplier() as i128;

            match n.checked_mul(multiplier) {
                Some(b) if b <= u64::MAX as i128 => b as u64,
                _ => return Err(VDiskError::InvalidArgument(format!("size {} is too large", value))),
            }
        }
        Err(_) => {
            if unit.is_some() {
                return Err(VDiskError::InvalidArgument(format!(
                    "size \"{}\" already carries a unit",
                    value
                )));
            }

            match sized_string_to_u64(value) {
                Some(0) => {
                    return Err(VDiskError::InvalidArgument(
                        "size must be greater than 0".to_string(),
                    ))
                }
                Some(b) => b,
                None => return Err(VDiskError::InvalidArgument(format!("invalid size \"{}\"", value))),
            }
        }
    };

    return Ok(bytes);
}

pub fn sized_string_to_u64(string: &str) -> Option<u64> {
    return match Byte::from_str(string) {
        Ok(b) => Some(b.get_bytes() as u64),
        Err(_) => None,
    };
}

pub fn u64_to_sized_string(n: u64) -> String {
    return Byte::from(n).get_appropriate_unit(true).to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suffix() {
        assert_eq!(sized_string_to_u64("12").unwrap(), 12)
    }

    #[test]
    fn test_no_suffix_2() {
        assert_eq!(sized_string_to_u64("12333").unwrap(), 12333)
    }

    #[test]
    fn test_kib() {
        assert_eq!(sized_string_to_u64("123KiB").unwrap(), 125_952)
    }

    #[test]
    fn test_mib() {
        assert_eq!(sized_string_to_u64("123MiB").unwrap(), 128_974_848)
    }

    #[test]
    fn test_fail() {
        assert!(sized_string_to_u64("123AB").is_none())
    }

    #[test]
    fn test_fail_2() {
        assert!(sized_string_to_u64("GB").is_none())
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(SizeUnit::from_name("K"), Some(SizeUnit::Kilobytes));
        assert_eq!(SizeUnit::from_name("m"), Some(SizeUnit::Megabytes));
        assert_eq!(SizeUnit::from_name("b"), Some(SizeUnit::Bytes));
        assert_eq!(SizeUnit::from_name("g"), None);
    }

    #[test]
    fn test_parse_with_units() {
        assert_eq!(parse_size("200", Some("k"), SizeUnit::Megabytes).unwrap(), 204_800);
        assert_eq!(parse_size("1", None, SizeUnit::Megabytes).unwrap(), 1_048_576);
        assert_eq!(parse_size(" 512 ", Some("B"), SizeUnit::Kilobytes).unwrap(), 512);
    }

    #[test]
    fn test_parse_with_suffix() {
        assert_eq!(parse_size("200KiB", None, SizeUnit::Megabytes).unwrap(), 204_800);
        assert!(parse_size("200KiB", Some("k"), SizeUnit::Megabytes).is_err());
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        for value in ["0", "-5", "0KiB"].iter() {
            match parse_size(value, None, SizeUnit::Kilobytes) {
                Err(VDiskError::InvalidArgument(_)) => (),
                other => panic!("Unexpected result for {}: {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        match parse_size("10", Some("t"), SizeUnit::Kilobytes) {
            Err(VDiskError::InvalidArgument(_)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_size("18446744073709551615", Some("m"), SizeUnit::Bytes).is_err());
    }
}
