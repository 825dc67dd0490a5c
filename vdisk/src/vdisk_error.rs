use alloc::string::String;
use core::fmt::{Debug, Display};

macro_rules! enum_variant_stringify {
    ($self:expr, [$($var:ident),+]) => {
        match $self {
            $(
               $var => stringify!($var),
            )+
            _ => "",
        }
    }
}

pub trait VDiskErrorConvertible: Debug {
    /// Lift a storage backend error into the library error type.
    fn into_vdisk_error(self) -> VDiskError<Self>
    where
        Self: Sized,
    {
        return VDiskError::StorageIO(self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VDiskError<E> {
    InvalidArgument(String),
    InvalidPartitionName,
    DiskAlreadyExists,
    DiskNotFound,
    PartitionNotFound,
    TableFull,
    DuplicateExtended,
    NameCollision(String),
    NoExtendedPartition,
    InsufficientSpace,
    AlreadyMounted(String),
    DiskLettersExhausted,
    CorruptedBootRecord,
    CorruptedDescriptor,
    CorruptedDescriptorChain,
    StorageIO(E),
}

impl<E: Display> core::fmt::Display for VDiskError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use VDiskError::*;

        match self {
            StorageIO(e) => write!(f, "Storage error: {}", e),
            InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            NameCollision(n) => write!(f, "A partition named \"{}\" already exists", n),
            AlreadyMounted(n) => write!(f, "The partition \"{}\" is already mounted", n),
            _ => write!(
                f,
                "{}",
                enum_variant_stringify!(
                    self,
                    [
                        InvalidPartitionName,
                        DiskAlreadyExists,
                        DiskNotFound,
                        PartitionNotFound,
                        TableFull,
                        DuplicateExtended,
                        NoExtendedPartition,
                        InsufficientSpace,
                        DiskLettersExhausted,
                        CorruptedBootRecord,
                        CorruptedDescriptor,
                        CorruptedDescriptorChain
                    ]
                )
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::VDiskError;
    use alloc::string::String;

    #[derive(Debug)]
    struct DummyError;

    impl core::fmt::Display for DummyError {
        fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
            write!(f, "DummyError")
        }
    }

    #[test]
    fn test_fmt_1() {
        let err: VDiskError<DummyError> = VDiskError::TableFull;
        assert_eq!("TableFull", format!("{}", err));
    }

    #[test]
    fn test_fmt_2() {
        let err: VDiskError<DummyError> = VDiskError::InsufficientSpace;
        assert_eq!("InsufficientSpace", format!("{}", err));
    }

    #[test]
    fn test_fmt_3() {
        let err: VDiskError<DummyError> = VDiskError::StorageIO(DummyError);
        assert_eq!("Storage error: DummyError", format!("{}", err));
    }

    #[test]
    fn test_fmt_4() {
        let err: VDiskError<DummyError> = VDiskError::NameCollision(String::from("P1"));
        assert_eq!("A partition named \"P1\" already exists", format!("{}", err));
    }

    #[test]
    fn test_fmt_5() {
        let err: VDiskError<DummyError> =
            VDiskError::InvalidArgument(String::from("size must be greater than 0"));
        assert_eq!(
            "Invalid argument: size must be greater than 0",
            format!("{}", err)
        );
    }
}
