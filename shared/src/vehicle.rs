use serde::{Deserialize, Serialize};

use crate::taxonomy::{BodyType, Brand};

/// A rentable vehicle, as authored in the bundled fleet data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    /// Unique URL key.
    pub slug: String,
    pub name: String,
    pub brand: Brand,
    pub category: BodyType,
    pub year: u16,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<CarImage>,
    pub pricing: CarPricing,
    pub specs: CarSpecs,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub is_available: bool,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub interior_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarImage {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Rates in whole AED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPricing {
    pub daily: u32,
    pub weekly: u32,
    pub monthly: u32,
    #[serde(default)]
    pub deposit: u32,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "AED")]
    Aed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSpecs {
    pub engine: String,
    pub horsepower: u16,
    /// 0-100 km/h, e.g. `"2.9s"`.
    pub acceleration: String,
    /// km/h.
    pub top_speed: u16,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: u8,
    pub doors: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
    #[serde(rename = "Dual-Clutch")]
    DualClutch,
    #[serde(rename = "PDK")]
    Pdk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl Car {
    /// The image flagged primary, falling back to the first one.
    pub fn primary_image(&self) -> Option<&CarImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }

    /// Free-text match: `needle_lower` (already lowercased) is a substring
    /// of the name, the brand id or the body-type id.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.brand.id().contains(needle_lower)
            || self.category.id().contains(needle_lower)
    }
}

/// Card-sized projection of a [`Car`] for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarListItem {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub brand: Brand,
    pub brand_label: String,
    pub category: BodyType,
    pub category_label: String,
    pub year: u16,
    pub tagline: String,
    pub daily_price: u32,
    pub price_label: String,
    pub image: Option<String>,
    pub is_featured: bool,
}

impl From<&Car> for CarListItem {
    fn from(car: &Car) -> Self {
        CarListItem {
            id: car.id.clone(),
            slug: car.slug.clone(),
            name: car.name.clone(),
            brand: car.brand,
            brand_label: car.brand.label().to_string(),
            category: car.category,
            category_label: car.category.label().to_string(),
            year: car.year,
            tagline: car.tagline.clone(),
            daily_price: car.pricing.daily,
            price_label: format_aed(car.pricing.daily),
            image: car.primary_image().map(|image| image.src.clone()),
            is_featured: car.is_featured,
        }
    }
}

/// `1500` -> `"AED 1,500"`.
pub fn format_aed(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("AED {grouped}")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal car for pipeline tests; slug and id derive from `name`.
    pub fn car(
        name: &str,
        brand: Brand,
        category: BodyType,
        daily: u32,
        year: u16,
        featured: bool,
    ) -> Car {
        let slug = name.to_lowercase().replace(' ', "-");
        Car {
            id: slug.clone(),
            slug,
            name: name.to_string(),
            brand,
            category,
            year,
            tagline: String::new(),
            description: String::new(),
            images: Vec::new(),
            pricing: CarPricing {
                daily,
                weekly: daily * 6,
                monthly: daily * 22,
                deposit: 0,
                currency: Currency::Aed,
            },
            specs: CarSpecs {
                engine: "V8".to_string(),
                horsepower: 500,
                acceleration: "3.5s".to_string(),
                top_speed: 300,
                transmission: Transmission::Automatic,
                fuel_type: FuelType::Petrol,
                seats: 4,
                doors: 2,
            },
            features: Vec::new(),
            is_featured: featured,
            is_available: true,
            color: String::new(),
            interior_color: String::new(),
        }
    }

    pub fn retired(mut car: Car) -> Car {
        car.is_available = false;
        car
    }
}
