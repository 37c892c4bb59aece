use chrono::NaiveDate;

use crate::error::SkyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn from_str_loose(s: &str) -> Result<Self, SkyError> {
        match s {
            "economy" => Ok(Self::Economy),
            "premium_economy" | "premium-economy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(SkyError::Validation(format!("invalid cabin class: {s}"))),
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::PremiumEconomy => "premium_economy",
            Self::Business => "business",
            Self::First => "first",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub origin_entity_id: String,
    pub destination_entity_id: String,
    pub date: String,
    pub return_date: Option<String>,
    pub adults: u32,
    pub cabin_class: CabinClass,
}

fn require(value: &str, flag: &str) -> Result<(), SkyError> {
    if value.trim().is_empty() {
        return Err(SkyError::Validation(format!("{flag} must not be empty")));
    }
    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate, SkyError> {
    if date.len() != 10 {
        return Err(SkyError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| SkyError::InvalidDate(date.to_string()))
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), SkyError> {
        require(&self.origin_sky_id, "--origin-sky-id")?;
        require(&self.destination_sky_id, "--destination-sky-id")?;
        require(&self.origin_entity_id, "--origin-entity-id")?;
        require(&self.destination_entity_id, "--destination-entity-id")?;

        let depart = parse_date(&self.date)?;
        if let Some(ref ret) = self.return_date {
            if parse_date(ret)? < depart {
                return Err(SkyError::Validation(format!(
                    "return date {ret} is before departure date {}",
                    self.date
                )));
            }
        }

        if self.adults == 0 {
            return Err(SkyError::Validation(
                "at least one adult passenger required".into(),
            ));
        }
        if self.adults > 9 {
            return Err(SkyError::Validation(format!(
                "adult passengers ({}) exceeds maximum of 9",
                self.adults
            )));
        }

        Ok(())
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("originSkyId".to_string(), self.origin_sky_id.clone()),
            ("destinationSkyId".to_string(), self.destination_sky_id.clone()),
            ("originEntityId".to_string(), self.origin_entity_id.clone()),
            ("destinationEntityId".to_string(), self.destination_entity_id.clone()),
            ("date".to_string(), self.date.clone()),
        ];

        if let Some(ref ret) = self.return_date {
            params.push(("returnDate".to_string(), ret.clone()));
        }
        params.push(("adults".to_string(), self.adults.to_string()));
        params.push(("cabinClass".to_string(), self.cabin_class.as_param().to_string()));

        params
    }
}
