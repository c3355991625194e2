#![allow(dead_code)]

use std::{collections::HashMap, sync::{Arc, Mutex}};

use impactmap::{Fetch, FetchError};

pub const HEADER: &str = "Latitude,Longitude,Type of Token,description,external_url,Starting Project,Unit,\
Deleverable,Years_Duration,Impact Type,SDGs,Implementer Partner,Internal Verification,Local Verification,\
Imv_Document,KML";

/// One CSV row with the given coordinates, SDGs and KML cell.
pub fn row(lat: &str, lon: &str, sdgs: &str, kml: &str) -> String {
    format!(
        "{lat},{lon},Carbon,Mangrove restoration,https://example.org/p,Delta Mangroves,ha,\
         Planted hectares,5,Environmental,\"{sdgs}\",Coastal Trust,Drone survey,Community audit,\
         https://example.org/imv.pdf,{kml}"
    )
}

pub fn csv(rows: &[String]) -> String {
    let mut out = HEADER.to_string();
    for r in rows {
        out.push('\n');
        out.push_str(r);
    }
    out.push('\n');
    out
}

pub fn kml_polygon(coords: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document><Placemark><Polygon><outerBoundaryIs><LinearRing>
<coordinates>{coords}</coordinates>
</LinearRing></outerBoundaryIs></Polygon></Placemark></Document></kml>"#
    )
}

/// Serves canned responses and records every URL requested.
#[derive(Default, Clone)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<Vec<u8>, u16>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn fail(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { url: url.to_string(), status: *status }),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}
