pub mod number {
    use core::fmt;
    use std::{marker::PhantomData, str::FromStr};

    use serde::{
        de::{self, Unexpected, Visitor},
        Deserialize, Deserializer,
    };

    /// Parse a number that the upstream API delivers either as JSON number or
    /// as string, e.g. `"7.0"` or `7.0`. Surrounding whitespace is ignored.
    pub fn deserialize_from_str_or_number<'de, D, T>(
        deserializer: D,
    ) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        deserializer.deserialize_any(NumberVisitor(PhantomData))
    }

    /// Like [`deserialize_from_str_or_number`], but `null`, a missing key
    /// (together with `#[serde(default)]`) and a blank string become `None`.
    pub fn deserialize_option_from_str_or_number<'de, D, T>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        match Option::<StrOrNumber<T>>::deserialize(deserializer)? {
            Some(StrOrNumber(value)) => Ok(value),
            None => Ok(None),
        }
    }

    /// `None` for a blank string, so empty fields do not turn into zero.
    struct StrOrNumber<T>(Option<T>);

    impl<'de, T: FromStr> Deserialize<'de> for StrOrNumber<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer
                .deserialize_any(OptionalNumberVisitor(PhantomData))
                .map(StrOrNumber)
        }
    }

    fn parse<T: FromStr, E: de::Error>(
        value: &str,
        expected: &dyn de::Expected,
    ) -> Result<T, E> {
        value
            .trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(value), expected))
    }

    struct NumberVisitor<T>(PhantomData<T>);

    impl<'de, T: FromStr> Visitor<'de> for NumberVisitor<T> {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string containing a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<T, E>
        where
            E: de::Error,
        {
            parse(value, &self)
        }

        fn visit_i64<E>(self, value: i64) -> Result<T, E>
        where
            E: de::Error,
        {
            value
                .to_string()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<T, E>
        where
            E: de::Error,
        {
            value
                .to_string()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E>(self, value: f64) -> Result<T, E>
        where
            E: de::Error,
        {
            /* `Display` prints integral floats without fraction, so 3.0 still parses as integer */
            value
                .to_string()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Float(value), &self))
        }
    }

    struct OptionalNumberVisitor<T>(PhantomData<T>);

    impl<'de, T: FromStr> Visitor<'de> for OptionalNumberVisitor<T> {
        type Value = Option<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a string containing a number or an empty string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            if value.trim().is_empty() {
                Ok(None)
            } else {
                parse(value, &self).map(Some)
            }
        }

        fn visit_i64<E>(self, value: i64) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            NumberVisitor(PhantomData).visit_i64(value).map(Some)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            NumberVisitor(PhantomData).visit_u64(value).map(Some)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            NumberVisitor(PhantomData).visit_f64(value).map(Some)
        }
    }
}

pub mod text {
    use core::fmt;

    use serde::{
        de::{self, Visitor},
        Deserializer,
    };

    /// Text field that the datastore may also deliver as JSON number, e.g.
    /// a house number `24`. Numbers are kept in their JSON notation, `null`
    /// is an error.
    pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TextVisitor)
    }

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_owned())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }
}

pub mod optional {
    use serde::{Deserialize, Deserializer};

    /// The API sends `""` for fields that are not set.
    pub fn deserialize_empty_as_none<'de, D>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
    }
}

pub mod date_time {
    use chrono::{DateTime, Local, NaiveDate, TimeZone as _};
    use serde::{de::Error, Deserialize as _, Deserializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Parses `YYYY-MM-DD` as midnight of that day in the local time zone.
    pub fn parse_local_date(s: &str) -> Result<DateTime<Local>, String> {
        let naive_date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|why| format!("invalid date '{s}': {why}"))?;
        let midnight = naive_date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("no midnight for '{s}'"))?;
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| format!("midnight of '{s}' does not exist in the local time zone"))
    }

    pub fn deserialize_local_date<'de, D>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_local_date(&s).map_err(Error::custom)
    }
}
