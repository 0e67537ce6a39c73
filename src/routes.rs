//! Directed city-pair distance table

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{CalcError, Result};
use crate::models::Route;

/// Popular routes between Brazilian capitals and regions, in km.
/// Reverse directions are listed explicitly; lookup never infers them.
const DEFAULT_ROUTES: &[(&str, &str, f64)] = &[
    // Southeast
    ("São Paulo", "Rio de Janeiro", 430.0),
    ("São Paulo", "Belo Horizonte", 586.0),
    ("São Paulo", "Brasília", 1015.0),
    ("Rio de Janeiro", "Belo Horizonte", 435.0),
    ("Rio de Janeiro", "Brasília", 1200.0),
    ("Belo Horizonte", "Brasília", 740.0),
    ("São Paulo", "Campinas", 100.0),
    ("São Paulo", "Sorocaba", 108.0),
    // Northeast
    ("Salvador", "Recife", 790.0),
    ("Salvador", "Fortaleza", 1200.0),
    ("Recife", "Fortaleza", 780.0),
    ("Salvador", "João Pessoa", 560.0),
    ("Recife", "João Pessoa", 180.0),
    ("Brasília", "Salvador", 1500.0),
    // South
    ("Curitiba", "Porto Alegre", 710.0),
    ("São Paulo", "Curitiba", 408.0),
    ("Curitiba", "Florianópolis", 400.0),
    ("Rio de Janeiro", "Curitiba", 700.0),
    ("Florianópolis", "Porto Alegre", 520.0),
    // North
    ("Manaus", "Belém", 1400.0),
    ("Brasília", "Manaus", 2900.0),
    ("Brasília", "Palmas", 1100.0),
    // Center-West
    ("Brasília", "Goiânia", 209.0),
    ("Brasília", "Cuiabá", 913.0),
    ("Goiânia", "Cuiabá", 930.0),
    // Reverse directions
    ("Rio de Janeiro", "São Paulo", 430.0),
    ("Belo Horizonte", "São Paulo", 586.0),
    ("Brasília", "São Paulo", 1015.0),
    ("Belo Horizonte", "Rio de Janeiro", 435.0),
    ("Brasília", "Rio de Janeiro", 1200.0),
    ("Brasília", "Belo Horizonte", 740.0),
    ("Campinas", "São Paulo", 100.0),
    ("Sorocaba", "São Paulo", 108.0),
    ("Recife", "Salvador", 790.0),
    ("Fortaleza", "Salvador", 1200.0),
    ("Fortaleza", "Recife", 780.0),
    ("João Pessoa", "Salvador", 560.0),
    ("João Pessoa", "Recife", 180.0),
    ("Porto Alegre", "Curitiba", 710.0),
    ("Curitiba", "São Paulo", 408.0),
    ("Florianópolis", "Curitiba", 400.0),
    ("Curitiba", "Rio de Janeiro", 700.0),
    ("Porto Alegre", "Florianópolis", 520.0),
    ("Belém", "Manaus", 1400.0),
    ("Manaus", "Brasília", 2900.0),
    ("Palmas", "Brasília", 1100.0),
    ("Goiânia", "Brasília", 209.0),
    ("Cuiabá", "Brasília", 913.0),
    ("Cuiabá", "Goiânia", 930.0),
];

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

/// In-memory store of directed routes. Append-only after construction.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the built-in Brazilian routes
    pub fn with_default_routes() -> Self {
        let mut table = Self::new();
        for (origin, destination, distance) in DEFAULT_ROUTES {
            table.add_route(origin, destination, *distance);
        }
        table
    }

    /// Look up the distance for the exact directed pair `origin -> destination`.
    ///
    /// Names are compared after trimming and lowercasing. Returns `None` when
    /// no entry exists in that direction, even if the reverse one does.
    pub fn find_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        let origin = normalize(origin);
        let destination = normalize(destination);
        if origin.is_empty() || destination.is_empty() {
            return None;
        }

        self.routes
            .iter()
            .find(|r| normalize(&r.origin) == origin && normalize(&r.destination) == destination)
            .map(|r| r.distance)
    }

    /// Directed lookup first, then the reverse pair
    pub fn find_distance_either_way(&self, origin: &str, destination: &str) -> Option<f64> {
        self.find_distance(origin, destination)
            .or_else(|| self.find_distance(destination, origin))
    }

    /// Every distinct city name, sorted ascending
    pub fn all_cities(&self) -> Vec<String> {
        let cities: BTreeSet<&str> = self
            .routes
            .iter()
            .flat_map(|r| [r.origin.as_str(), r.destination.as_str()])
            .collect();
        cities.into_iter().map(str::to_string).collect()
    }

    /// Append a directed route. Entries with a blank city or a non-positive
    /// distance are dropped without error.
    pub fn add_route(&mut self, origin: &str, destination: &str, distance: f64) {
        let origin = origin.trim();
        let destination = destination.trim();

        if origin.is_empty() || destination.is_empty() || !(distance > 0.0) {
            log::debug!(
                "Discarding invalid route '{}' -> '{}' ({} km)",
                origin,
                destination,
                distance
            );
            return;
        }

        self.routes.push(Route {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance,
        });
    }

    /// Append every route from a JSON array of `{origin, destination, distance}`
    /// objects. Returns how many were accepted.
    pub fn extend_from_json(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)?;
        let routes: Vec<Route> = serde_json::from_str(&content)?;

        let before = self.routes.len();
        for route in &routes {
            self.add_route(&route.origin, &route.destination, route.distance);
        }
        let added = self.routes.len() - before;

        log::info!(
            "Added {} of {} routes from {}",
            added,
            routes.len(),
            path.display()
        );
        Ok(added)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Pick the distance for a trip: a manual value wins, otherwise the table
/// must hold the directed route.
pub fn resolve_distance(
    table: &RouteTable,
    origin: &str,
    destination: &str,
    manual: Option<f64>,
) -> Result<f64> {
    if let Some(distance) = manual {
        return Ok(distance);
    }

    table
        .find_distance(origin, destination)
        .ok_or_else(|| CalcError::RouteNotFound {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
        })
}
