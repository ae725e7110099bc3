//! Reference data provider called by generated sample accessors.
//!
//! Deterministic generators number their values by item index so every
//! sample is traceable (`int() == index`, `string() == "string-<index>"`).
//! Categorized deterministic values come from `fake`, driven by a ChaCha8
//! generator seeded only from the kind, the category and the index.

mod catalog;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fake::Fake;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use sampleforge_core::{CategoryTag, ItemMode, ScalarKind};

pub use catalog::category_value;

const DEFAULT_INT_MAX: i64 = 10_000;
const DEFAULT_FLOAT_MAX: f64 = 10_000.0;
const DATE_SPAN_DAYS: i64 = 3_650;
const DEFAULT_DATA_LEN: usize = 16;

/// A concrete value produced for one scalar slot.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Url(String),
}

impl GeneratedValue {
    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Bool(value) => Value::Bool(*value),
            GeneratedValue::Int(value) => Value::from(*value),
            GeneratedValue::UInt(value) => Value::from(*value),
            GeneratedValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            GeneratedValue::Text(value) | GeneratedValue::Url(value) => {
                Value::String(value.clone())
            }
            GeneratedValue::Bytes(value) => Value::from(value.clone()),
            GeneratedValue::Timestamp(value) => Value::String(value.to_rfc3339()),
            GeneratedValue::Uuid(value) => Value::String(value.to_string()),
        }
    }

    /// Textual rendering used when a value lands in a string slot.
    pub fn to_text(&self) -> String {
        match self {
            GeneratedValue::Bool(value) => value.to_string(),
            GeneratedValue::Int(value) => value.to_string(),
            GeneratedValue::UInt(value) => value.to_string(),
            GeneratedValue::Float(value) => format!("{value:.2}"),
            GeneratedValue::Text(value) | GeneratedValue::Url(value) => value.clone(),
            GeneratedValue::Bytes(value) => String::from_utf8_lossy(value).into_owned(),
            GeneratedValue::Timestamp(value) => value.to_rfc3339(),
            GeneratedValue::Uuid(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Indexed(usize),
    Random,
}

/// Provider of scalar sample values.
///
/// Every operation is a pure function of the generator's index and
/// category, except in random mode, which draws from the thread-local
/// generator or from an explicitly passed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataGenerator {
    source: Source,
    category: Option<CategoryTag>,
}

impl DataGenerator {
    /// Generator whose values derive from the 1-based item `index`.
    pub fn deterministic(index: usize) -> Self {
        Self {
            source: Source::Indexed(index),
            category: None,
        }
    }

    pub fn random() -> Self {
        Self {
            source: Source::Random,
            category: None,
        }
    }

    pub fn for_mode(mode: ItemMode) -> Self {
        match mode {
            ItemMode::Deterministic(index) => Self::deterministic(index),
            ItemMode::Random => Self::random(),
        }
    }

    /// Qualify by a category in its textual form. Unknown tags leave the
    /// generator uncategorized.
    pub fn with_category(self, tag: &str) -> Self {
        let category = match tag.parse::<CategoryTag>() {
            Ok(category) => Some(category),
            Err(error) => {
                debug!(tag, error = %error, "category ignored");
                None
            }
        };
        self.with_tag(category)
    }

    pub fn with_tag(mut self, category: Option<CategoryTag>) -> Self {
        self.category = category.filter(|tag| *tag != CategoryTag::Default);
        self
    }

    pub fn category(&self) -> Option<&CategoryTag> {
        self.category.as_ref()
    }

    /// Produce a value of `kind`.
    pub fn value(&self, kind: ScalarKind) -> GeneratedValue {
        match self.source {
            Source::Indexed(index) => match &self.category {
                Some(category) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(item_seed(kind, category, index));
                    categorized(kind, category, &mut rng)
                }
                None => indexed(kind, index),
            },
            Source::Random => self.value_from(kind, &mut rand::rng()),
        }
    }

    /// Produce a value of `kind` drawing from `rng`, ignoring the index.
    pub fn value_from(&self, kind: ScalarKind, rng: &mut dyn RngCore) -> GeneratedValue {
        match &self.category {
            Some(category) => categorized(kind, category, rng),
            None => drawn(kind, rng),
        }
    }

    pub fn bool(&self) -> bool {
        matches!(self.value(ScalarKind::Bool), GeneratedValue::Bool(true))
    }

    pub fn int(&self) -> isize {
        isize::try_from(self.signed(ScalarKind::Int)).unwrap_or_default()
    }

    pub fn int8(&self) -> i8 {
        i8::try_from(self.signed(ScalarKind::Int8)).unwrap_or_default()
    }

    pub fn int16(&self) -> i16 {
        i16::try_from(self.signed(ScalarKind::Int16)).unwrap_or_default()
    }

    pub fn int32(&self) -> i32 {
        i32::try_from(self.signed(ScalarKind::Int32)).unwrap_or_default()
    }

    pub fn int64(&self) -> i64 {
        self.signed(ScalarKind::Int64)
    }

    pub fn uint(&self) -> usize {
        usize::try_from(self.unsigned(ScalarKind::UInt)).unwrap_or_default()
    }

    pub fn uint8(&self) -> u8 {
        u8::try_from(self.unsigned(ScalarKind::UInt8)).unwrap_or_default()
    }

    pub fn uint16(&self) -> u16 {
        u16::try_from(self.unsigned(ScalarKind::UInt16)).unwrap_or_default()
    }

    pub fn uint32(&self) -> u32 {
        u32::try_from(self.unsigned(ScalarKind::UInt32)).unwrap_or_default()
    }

    pub fn uint64(&self) -> u64 {
        self.unsigned(ScalarKind::UInt64)
    }

    pub fn float(&self) -> f32 {
        self.floating(ScalarKind::Float) as f32
    }

    pub fn double(&self) -> f64 {
        self.floating(ScalarKind::Double)
    }

    pub fn string(&self) -> String {
        self.value(ScalarKind::String).to_text()
    }

    pub fn data(&self) -> Vec<u8> {
        match self.value(ScalarKind::Data) {
            GeneratedValue::Bytes(bytes) => bytes,
            other => other.to_text().into_bytes(),
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self.value(ScalarKind::Date) {
            GeneratedValue::Timestamp(value) => value,
            _ => base_date(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self.value(ScalarKind::Uuid) {
            GeneratedValue::Uuid(value) => value,
            _ => Uuid::nil(),
        }
    }

    /// URL in its textual form.
    pub fn url(&self) -> String {
        self.value(ScalarKind::Url).to_text()
    }

    fn signed(&self, kind: ScalarKind) -> i64 {
        match self.value(kind) {
            GeneratedValue::Int(value) => value,
            _ => 0,
        }
    }

    fn unsigned(&self, kind: ScalarKind) -> u64 {
        match self.value(kind) {
            GeneratedValue::UInt(value) => value,
            _ => 0,
        }
    }

    fn floating(&self, kind: ScalarKind) -> f64 {
        match self.value(kind) {
            GeneratedValue::Float(value) => value,
            _ => 0.0,
        }
    }
}

/// Upper bound of integer values handed out for `kind`.
fn int_max(kind: ScalarKind) -> i64 {
    match kind {
        ScalarKind::Int8 => i8::MAX as i64,
        ScalarKind::UInt8 => u8::MAX as i64,
        _ => DEFAULT_INT_MAX,
    }
}

fn is_signed(kind: ScalarKind) -> bool {
    matches!(
        kind,
        ScalarKind::Int
            | ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int32
            | ScalarKind::Int64
    )
}

fn is_unsigned(kind: ScalarKind) -> bool {
    matches!(
        kind,
        ScalarKind::UInt
            | ScalarKind::UInt8
            | ScalarKind::UInt16
            | ScalarKind::UInt32
            | ScalarKind::UInt64
    )
}

fn base_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Traceable value numbered by `index`.
///
/// Numbers wrap into the kind's range and dates into the span of years
/// starting at the base date.
fn indexed(kind: ScalarKind, index: usize) -> GeneratedValue {
    let number = i64::try_from(index).unwrap_or(i64::MAX);
    match kind {
        ScalarKind::Bool => GeneratedValue::Bool(index % 2 == 1),
        kind if is_signed(kind) => GeneratedValue::Int(wrap(number, int_max(kind))),
        kind if is_unsigned(kind) => GeneratedValue::UInt(wrap(number, int_max(kind)) as u64),
        ScalarKind::Float | ScalarKind::Double => GeneratedValue::Float(number as f64),
        ScalarKind::Data => GeneratedValue::Bytes(format!("data-{index}").into_bytes()),
        ScalarKind::Date => {
            let days = number.rem_euclid(DATE_SPAN_DAYS);
            GeneratedValue::Timestamp(base_date() + Duration::days(days))
        }
        ScalarKind::Uuid => GeneratedValue::Uuid(Uuid::from_u128(index as u128)),
        ScalarKind::Url => GeneratedValue::Url(format!("https://example.com/items/{index}")),
        _ => GeneratedValue::Text(format!("string-{index}")),
    }
}

fn wrap(number: i64, max: i64) -> i64 {
    if number > max {
        number.rem_euclid(max + 1)
    } else {
        number
    }
}

/// Uncategorized value drawn from `rng`.
fn drawn(kind: ScalarKind, rng: &mut dyn RngCore) -> GeneratedValue {
    match kind {
        ScalarKind::Bool => GeneratedValue::Bool(rng.random_bool(0.5)),
        kind if is_signed(kind) => GeneratedValue::Int(rng.random_range(0..=int_max(kind))),
        kind if is_unsigned(kind) => {
            GeneratedValue::UInt(rng.random_range(0..=int_max(kind)) as u64)
        }
        ScalarKind::Float | ScalarKind::Double => {
            GeneratedValue::Float(rng.random_range(0.0..DEFAULT_FLOAT_MAX))
        }
        ScalarKind::Data => {
            let mut bytes = vec![0_u8; DEFAULT_DATA_LEN];
            rng.fill_bytes(&mut bytes);
            GeneratedValue::Bytes(bytes)
        }
        ScalarKind::Date => {
            let seconds = rng.random_range(0..DATE_SPAN_DAYS * 86_400);
            GeneratedValue::Timestamp(base_date() + Duration::seconds(seconds))
        }
        ScalarKind::Uuid => {
            let mut bytes = [0_u8; 16];
            rng.fill_bytes(&mut bytes);
            GeneratedValue::Uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
        }
        ScalarKind::Url => {
            let slug: String = fake::faker::lorem::en::Word().fake_with_rng(rng);
            let page = rng.random_range(1..=9999);
            GeneratedValue::Url(format!("https://example.com/{slug}/{page}"))
        }
        _ => {
            let value: String = fake::faker::lorem::en::Word().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
    }
}

/// Category family value coerced into `kind`; kinds the family cannot
/// express fall back to an uncategorized draw from the same source.
fn categorized(kind: ScalarKind, category: &CategoryTag, rng: &mut dyn RngCore) -> GeneratedValue {
    category_value(category, rng)
        .and_then(|value| coerce(value, kind))
        .unwrap_or_else(|| drawn(kind, rng))
}

fn coerce(value: GeneratedValue, kind: ScalarKind) -> Option<GeneratedValue> {
    match kind {
        ScalarKind::String => Some(GeneratedValue::Text(value.to_text())),
        ScalarKind::Url => Some(GeneratedValue::Url(value.to_text())),
        ScalarKind::Data => Some(GeneratedValue::Bytes(value.to_text().into_bytes())),
        ScalarKind::Float | ScalarKind::Double => match value {
            GeneratedValue::Float(value) => Some(GeneratedValue::Float(value)),
            GeneratedValue::Int(value) => Some(GeneratedValue::Float(value as f64)),
            _ => None,
        },
        kind if is_signed(kind) || is_unsigned(kind) => {
            let number = match value {
                GeneratedValue::Int(value) => value,
                GeneratedValue::Float(value) => value.round() as i64,
                _ => return None,
            };
            let max = coerce_max(kind);
            if !(0..=max).contains(&number) {
                return None;
            }
            if is_signed(kind) {
                Some(GeneratedValue::Int(number))
            } else {
                Some(GeneratedValue::UInt(number as u64))
            }
        }
        _ => None,
    }
}

fn coerce_max(kind: ScalarKind) -> i64 {
    match kind {
        ScalarKind::Int8 => i8::MAX as i64,
        ScalarKind::UInt8 => u8::MAX as i64,
        ScalarKind::Int16 => i16::MAX as i64,
        ScalarKind::UInt16 => u16::MAX as i64,
        _ => i32::MAX as i64,
    }
}

/// Seed derived from everything that identifies a categorized value.
fn item_seed(kind: ScalarKind, category: &CategoryTag, index: usize) -> u64 {
    let key = format!("{}|{}|{}", kind.method(), category, index);
    let mut hash = 0xcbf29ce484222325_u64;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_values_follow_the_index() {
        let generator = DataGenerator::deterministic(3);
        assert_eq!(generator.int(), 3);
        assert_eq!(generator.uint64(), 3);
        assert_eq!(generator.double(), 3.0);
        assert_eq!(generator.string(), "string-3");
        assert_eq!(generator.uuid(), Uuid::from_u128(3));
        assert_eq!(generator.url(), "https://example.com/items/3");
        assert_eq!(generator.date().to_rfc3339(), "2024-01-04T00:00:00+00:00");
        assert!(generator.bool());
        assert!(!DataGenerator::deterministic(2).bool());
    }

    #[test]
    fn narrow_kinds_stay_in_range() {
        assert_eq!(DataGenerator::deterministic(130).int8(), 2);
        assert_eq!(DataGenerator::deterministic(300).uint8(), 44);
    }

    #[test]
    fn large_indices_wrap_instead_of_overflowing() {
        let span = DATE_SPAN_DAYS as usize;
        assert_eq!(
            DataGenerator::deterministic(span + 3).date(),
            DataGenerator::deterministic(3).date()
        );
        for index in [200_000_000, usize::MAX] {
            let generator = DataGenerator::deterministic(index);
            let date = generator.date();
            assert!(date >= base_date());
            assert!(date < base_date() + Duration::days(DATE_SPAN_DAYS));
            assert!((0..=DEFAULT_INT_MAX).contains(&generator.int64()));
        }
    }

    #[test]
    fn categorized_values_are_stable_per_index() {
        let first = DataGenerator::deterministic(5).with_category("email").string();
        let again = DataGenerator::deterministic(5).with_category("email").string();
        assert_eq!(first, again);
        assert!(first.contains('@'));
    }

    #[test]
    fn category_text_round_trips_through_the_provider() {
        let generator = DataGenerator::deterministic(1).with_category("image(width:64,height:32)");
        assert_eq!(
            generator.category(),
            Some(&CategoryTag::Image {
                width: 64,
                height: 32
            })
        );
        assert!(generator.url().ends_with("/64/32"));
    }

    #[test]
    fn unknown_and_default_categories_are_ignored() {
        assert_eq!(
            DataGenerator::deterministic(2).with_category("shoeSize").string(),
            "string-2"
        );
        assert_eq!(
            DataGenerator::deterministic(2).with_category("default").int(),
            2
        );
    }

    #[test]
    fn categories_that_cannot_fit_the_kind_fall_back() {
        let generator = DataGenerator::deterministic(4).with_category("email");
        let again = DataGenerator::deterministic(4).with_category("email");
        assert_eq!(generator.uuid(), again.uuid());
        assert!((0..=DEFAULT_INT_MAX).contains(&generator.int64()));
    }

    #[test]
    fn numeric_families_coerce_into_numeric_slots() {
        assert_eq!(
            coerce(GeneratedValue::Float(12.6), ScalarKind::Int),
            Some(GeneratedValue::Int(13))
        );
        assert_eq!(
            coerce(GeneratedValue::Int(2001), ScalarKind::UInt16),
            Some(GeneratedValue::UInt(2001))
        );
        assert_eq!(coerce(GeneratedValue::Int(2001), ScalarKind::Int8), None);
        assert_eq!(
            coerce(GeneratedValue::Float(9.5), ScalarKind::String),
            Some(GeneratedValue::Text("9.50".to_string()))
        );

        let price = DataGenerator::deterministic(9).with_category("price").double();
        assert!((1.0..=1000.0).contains(&price));
    }

    #[test]
    fn seeded_random_draws_are_reproducible() {
        let generator = DataGenerator::random();
        let mut left = ChaCha8Rng::seed_from_u64(99);
        let mut right = ChaCha8Rng::seed_from_u64(99);
        for kind in ScalarKind::ALL {
            assert_eq!(
                generator.value_from(*kind, &mut left),
                generator.value_from(*kind, &mut right)
            );
        }
    }

    #[test]
    fn json_forms() {
        assert_eq!(GeneratedValue::Int(4).to_json(), serde_json::json!(4));
        assert_eq!(
            GeneratedValue::Uuid(Uuid::from_u128(1)).to_json(),
            serde_json::json!("00000000-0000-0000-0000-000000000001")
        );
        assert_eq!(GeneratedValue::Float(f64::NAN).to_json(), Value::Null);
    }
}
