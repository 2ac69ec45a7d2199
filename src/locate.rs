// src/locate.rs
//! Place-name geolocation over an ordered gazetteer.

use anyhow::{anyhow, Result};
use regex::Regex;

use crate::event::Location;
use crate::lexicon::{Lexicon, Place};

/// Strategy seam for geolocation.
pub trait Locator: Send + Sync {
    fn locate(&self, text: &str) -> Location;
}

#[derive(Debug, Clone)]
struct CompiledPlace {
    re: Regex,
    location: Location,
}

/// Word-boundary, case-insensitive matcher. A disambiguation pass runs first so that
/// e.g. "Indiana" is never reported as "India"; then the table is scanned in order.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    priority: Vec<CompiledPlace>,
    places: Vec<CompiledPlace>,
}

/// ASCII word boundaries: an accented letter right after a name ends the word
/// ("Iranés" still hits Iran).
fn compile(place: &Place) -> Result<CompiledPlace> {
    let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(place.name.trim()));
    let re = Regex::new(&pattern)
        .map_err(|e| anyhow!("place `{}` regex error: {}", place.name, e))?;
    Ok(CompiledPlace {
        re,
        location: Location {
            lat: place.lat,
            lng: place.lng,
            country_code: place.country.clone(),
            place_name: place.display_name().to_string(),
        },
    })
}

impl Gazetteer {
    pub fn from_lexicon(lex: &Lexicon) -> Result<Self> {
        let places = lex
            .places
            .iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()?;

        let priority = lex
            .disambiguation
            .iter()
            .map(|name| {
                let place = lex
                    .places
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
                    .ok_or_else(|| anyhow!("disambiguation entry `{}` is not in places", name))?;
                compile(place)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { priority, places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// First matching place, or the Global sentinel.
    pub fn extract_location(&self, text: &str) -> Location {
        self.priority
            .iter()
            .chain(self.places.iter())
            .find(|p| p.re.is_match(text))
            .map(|p| p.location.clone())
            .unwrap_or_else(Location::global)
    }
}

impl Locator for Gazetteer {
    fn locate(&self, text: &str) -> Location {
        self.extract_location(text)
    }
}
