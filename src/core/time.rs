use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    to_primitive_utc(OffsetDateTime::now_utc())
}

pub(crate) fn to_primitive_utc(value: OffsetDateTime) -> PrimitiveDateTime {
    let utc = value.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

/// Accepts RFC 3339 as well as the zone-less `datetime-local` shapes browsers
/// submit (`YYYY-MM-DDTHH:MM[:SS]`, optionally space separated). Zone-less
/// values are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(to_primitive_utc(value));
    }

    let normalized = raw.replacen(' ', "T", 1);
    PrimitiveDateTime::parse(
        &normalized,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            &normalized,
            &format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        )
    })
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month, Time};

    fn at(hour: u8, minute: u8, second: u8) -> PrimitiveDateTime {
        let date = Date::from_calendar_date(2030, Month::March, 4).unwrap();
        PrimitiveDateTime::new(date, Time::from_hms(hour, minute, second).unwrap())
    }

    #[test]
    fn format_primitive_outputs_utc_z() {
        assert_eq!(format_primitive(at(10, 20, 30)), "2030-03-04T10:20:30Z");
    }

    #[test]
    fn parse_timestamp_converts_offsets_to_utc() {
        assert_eq!(parse_timestamp("2030-03-04T13:20:30+03:00"), Some(at(10, 20, 30)));
    }

    #[test]
    fn parse_timestamp_accepts_datetime_local() {
        assert_eq!(parse_timestamp("2030-03-04T10:20"), Some(at(10, 20, 0)));
        assert_eq!(parse_timestamp("2030-03-04 10:20:30"), Some(at(10, 20, 30)));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
