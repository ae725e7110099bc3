use fake::Fake;
use rand::{Rng, RngCore};

use sampleforge_core::CategoryTag;

use super::GeneratedValue;

const VEHICLE_MAKES: &[&str] = &[
    "Toyota", "Ford", "Honda", "Chevrolet", "Volkswagen", "Nissan", "Hyundai", "Kia", "Subaru",
    "Mazda",
];

const VEHICLE_MODELS: &[&str] = &[
    "Corolla", "F-150", "Civic", "Silverado", "Golf", "Altima", "Elantra", "Sportage", "Outback",
    "CX-5",
];

const VEHICLE_YEAR_MIN: i64 = 1990;
const VEHICLE_YEAR_MAX: i64 = 2024;

// Letters I, O and Q never appear in a VIN.
const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";
const VIN_LENGTH: usize = 17;

const PRICE_MIN: f64 = 1.0;
const PRICE_MAX: f64 = 1000.0;

/// Draw one value of the family selected by `tag`.
///
/// Returns `None` for `default`, which has no family of its own.
pub fn category_value(tag: &CategoryTag, rng: &mut dyn RngCore) -> Option<GeneratedValue> {
    let value = match tag {
        CategoryTag::Default => return None,
        CategoryTag::Email => {
            let value: String = fake::faker::internet::en::SafeEmail().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::FirstName => {
            let value: String = fake::faker::name::en::FirstName().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::LastName => {
            let value: String = fake::faker::name::en::LastName().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::FullName => {
            let value: String = fake::faker::name::en::Name().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::Address => {
            let number: String = fake::faker::address::en::BuildingNumber().fake_with_rng(rng);
            let street: String = fake::faker::address::en::StreetName().fake_with_rng(rng);
            let city: String = fake::faker::address::en::CityName().fake_with_rng(rng);
            GeneratedValue::Text(format!("{number} {street}, {city}"))
        }
        CategoryTag::AppVersion => {
            let value: String = fake::faker::filesystem::en::Semver().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::CreditCardNumber => {
            let value: String =
                fake::faker::creditcard::en::CreditCardNumber().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::CompanyName => {
            let value: String = fake::faker::company::en::CompanyName().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::Username => {
            let value: String = fake::faker::internet::en::Username().fake_with_rng(rng);
            GeneratedValue::Text(value)
        }
        CategoryTag::Price => {
            let cents = (rng.random_range(PRICE_MIN..PRICE_MAX) * 100.0).round();
            GeneratedValue::Float(cents / 100.0)
        }
        CategoryTag::Url => {
            let word: String = fake::faker::lorem::en::Word().fake_with_rng(rng);
            let suffix: String = fake::faker::internet::en::DomainSuffix().fake_with_rng(rng);
            let page = rng.random_range(1..=9999);
            GeneratedValue::Url(format!("https://{word}.{suffix}/page-{page}"))
        }
        CategoryTag::Image { width, height } => {
            let id = rng.random_range(1..=1000);
            GeneratedValue::Url(format!("https://picsum.photos/id/{id}/{width}/{height}"))
        }
        CategoryTag::VehicleMake => GeneratedValue::Text(pick(VEHICLE_MAKES, rng).to_string()),
        CategoryTag::VehicleModel => GeneratedValue::Text(pick(VEHICLE_MODELS, rng).to_string()),
        CategoryTag::VehicleYear => {
            GeneratedValue::Int(rng.random_range(VEHICLE_YEAR_MIN..=VEHICLE_YEAR_MAX))
        }
        CategoryTag::Vin => {
            let vin: String = (0..VIN_LENGTH)
                .map(|_| VIN_ALPHABET[rng.random_range(0..VIN_ALPHABET.len())] as char)
                .collect();
            GeneratedValue::Text(vin)
        }
        CategoryTag::BinaryString => {
            let length = rng.random_range(8..=32);
            let bits: String = (0..length)
                .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
                .collect();
            GeneratedValue::Text(bits)
        }
    };
    Some(value)
}

fn pick<'a>(values: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    values[rng.random_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn same_seed_same_value() {
        let tag = CategoryTag::FullName;
        let first = category_value(&tag, &mut ChaCha8Rng::seed_from_u64(42));
        let second = category_value(&tag, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn image_urls_carry_dimensions() {
        let tag = CategoryTag::Image {
            width: 243,
            height: 123,
        };
        let value = category_value(&tag, &mut ChaCha8Rng::seed_from_u64(7)).expect("value");
        let GeneratedValue::Url(url) = value else {
            panic!("expected a url");
        };
        assert!(url.ends_with("/243/123"), "{url}");
    }

    #[test]
    fn vins_use_the_restricted_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let Some(GeneratedValue::Text(vin)) = category_value(&CategoryTag::Vin, &mut rng)
            else {
                panic!("expected text");
            };
            assert_eq!(vin.len(), VIN_LENGTH);
            assert!(!vin.contains(['I', 'O', 'Q']));
        }
    }

    #[test]
    fn default_has_no_family() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(category_value(&CategoryTag::Default, &mut rng), None);
    }

    #[test]
    fn emails_and_years_look_right() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let Some(GeneratedValue::Text(email)) = category_value(&CategoryTag::Email, &mut rng)
        else {
            panic!("expected text");
        };
        assert!(email.contains('@'));

        let Some(GeneratedValue::Int(year)) = category_value(&CategoryTag::VehicleYear, &mut rng)
        else {
            panic!("expected an int");
        };
        assert!((VEHICLE_YEAR_MIN..=VEHICLE_YEAR_MAX).contains(&year));
    }
}
