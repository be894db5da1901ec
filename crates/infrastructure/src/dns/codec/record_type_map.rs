use ferrous_resolve_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Bidirectional mapper between domain and hickory record types.
///
/// Both sides carry unknown types by code, so the mapping is total.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    #[inline]
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    #[inline]
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types_map_both_ways() {
        let pairs = [
            (RecordType::A, HickoryRecordType::A),
            (RecordType::AAAA, HickoryRecordType::AAAA),
            (RecordType::CNAME, HickoryRecordType::CNAME),
            (RecordType::MX, HickoryRecordType::MX),
            (RecordType::TXT, HickoryRecordType::TXT),
            (RecordType::HTTPS, HickoryRecordType::HTTPS),
        ];
        for (ours, theirs) in pairs {
            assert_eq!(RecordTypeMapper::to_hickory(ours), theirs);
            assert_eq!(RecordTypeMapper::from_hickory(theirs), ours);
        }
    }

    #[test]
    fn test_unknown_type_keeps_code() {
        let hickory = RecordTypeMapper::to_hickory(RecordType::Other(65280));
        assert_eq!(u16::from(hickory), 65280);
        assert_eq!(
            RecordTypeMapper::from_hickory(hickory),
            RecordType::Other(65280)
        );
    }
}
