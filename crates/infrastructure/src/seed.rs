//! One-time database seeding
//!
//! Populates the store with a starter set of Swiss and French cities
//! (resolved through the normal resolver chain, which writes them to the
//! store) and the train-company reference table. Logic-free data plus a
//! loop; the decision logic all lives in the application services.

use application::services::GeoResolver;
use domain::entities::TrainCompany;
use tracing::{info, instrument, warn};

use crate::persistence::SqliteCompanyStore;

/// Swiss cities seeded into the store
const SWISS_CITIES: [&str; 46] = [
    "Zurich",
    "Geneva",
    "Basel",
    "Lausanne",
    "Bern",
    "Winterthur",
    "Lucerne",
    "St. Gallen",
    "Lugano",
    "Biel/Bienne",
    "La Chaux-de-Fonds",
    "Fribourg",
    "Schaffhausen",
    "Chur",
    "Neuchâtel",
    "Thun",
    "Sion",
    "Uster",
    "Sierre",
    "Zug",
    "Montreux",
    "Yverdon-les-Bains",
    "Schlieren",
    "Vevey",
    "Nyon",
    "Vernier",
    "Köniz",
    "Wettingen",
    "Frauenfeld",
    "Bellinzona",
    "Aarau",
    "Baden",
    "Bulle",
    "Carouge",
    "Crissier",
    "Ecublens",
    "Emmen",
    "Lancy",
    "Martigny",
    "Meyrin",
    "Morges",
    "Onex",
    "Renens",
    "Thalwil",
    "Veyrier",
    "Zollikon",
];

/// French cities seeded into the store
const FRENCH_CITIES: [&str; 31] = [
    "Paris",
    "Lyon",
    "Marseille",
    "Nice",
    "Nantes",
    "Strasbourg",
    "Montpellier",
    "Lille",
    "Rennes",
    "Reims",
    "Saint-Étienne",
    "Toulon",
    "Grenoble",
    "Dijon",
    "Angers",
    "Nîmes",
    "Metz",
    "Rouen",
    "Brest",
    "Le Mans",
    "Tours",
    "Clermont-Ferrand",
    "Limoges",
    "Perpignan",
    "Avignon",
    "Besançon",
    "Orléans",
    "Mulhouse",
    "Troyes",
    "Poitiers",
    "Pau",
];

/// Operator sites keyed by canonical country, with the spelling variants
/// the geocoder may report
const TRAIN_COMPANIES: [(&str, &[&str], &str); 18] = [
    ("Italy", &["Italia", "Italy"], "https://www.trenitalia.com"),
    ("Germany", &["Deutschland", "Germany"], "https://www.bahn.com"),
    ("France", &["France"], "https://www.sncf.com"),
    (
        "Switzerland",
        &["Schweiz", "Suisse", "Svizzera", "Svizra", "Switzerland"],
        "https://www.sbb.ch",
    ),
    ("Austria", &["Österreich", "Austria"], "https://www.oebb.at"),
    (
        "Hungary",
        &["Magyarország", "Hungary"],
        "https://www.mavcsoport.hu",
    ),
    (
        "Czech Republic",
        &["Česká republika", "Czech Republic", "Česko"],
        "https://www.cd.cz",
    ),
    (
        "Netherlands",
        &["Nederland", "Netherlands"],
        "https://www.ns.nl",
    ),
    (
        "Belgium",
        &["België / belgique / belgien"],
        "https://www.belgiantrain.be",
    ),
    (
        "UK",
        &["United kingdom", "UK"],
        "https://www.nationalrail.co.uk",
    ),
    ("Spain", &["España", "Spain"], "https://www.renfe.com"),
    ("Portugal", &["Portugal"], "https://www.cp.pt"),
    ("Greece", &["Ελλάδα", "Greece"], "https://www.trainose.gr"),
    ("Serbia", &["Srbija", "Serbia"], "https://www.srbvoz.rs"),
    ("Bulgaria", &["България", "Bulgaria"], "https://www.bdz.bg"),
    (
        "Turkey",
        &["Türkiye", "Turkey"],
        "https://www.tcddtasimacilik.gov.tr",
    ),
    ("Poland", &["Polska", "Poland"], "https://www.intercity.pl"),
    (
        "Romania",
        &["România", "Romania"],
        "https://www.cfrcalatori.ro",
    ),
];

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Cities resolved and stored
    pub cities_resolved: usize,
    /// Cities no source could resolve
    pub cities_failed: usize,
    /// Company spelling variants inserted
    pub company_variants: usize,
}

/// Populate the store with the seed cities and the company directory
///
/// Resolution goes through the normal resolver chain, which persists each
/// success; a city that cannot be resolved is logged and skipped, never
/// fatal. Safe to run repeatedly - every insert is insert-if-absent.
#[instrument(skip_all)]
pub async fn seed_database(
    resolver: &GeoResolver,
    companies: &SqliteCompanyStore,
) -> SeedSummary {
    let mut summary = SeedSummary::default();

    let seed_cities = SWISS_CITIES
        .iter()
        .map(|city| (*city, "Switzerland"))
        .chain(FRENCH_CITIES.iter().map(|city| (*city, "France")));

    for (city, country) in seed_cities {
        if resolver.resolve_coordinates(city, Some(country)).await.is_some() {
            summary.cities_resolved += 1;
        } else {
            warn!(%city, "Seed city could not be resolved");
            summary.cities_failed += 1;
        }
    }

    for (country, variants, url) in TRAIN_COMPANIES {
        for variant in variants {
            let company = TrainCompany::new(*variant, url);
            match companies.insert(&company).await {
                Ok(()) => summary.company_variants += 1,
                Err(e) => warn!(error = %e, %country, %variant, "Failed to store company"),
            }
        }
    }

    info!(
        cities = summary.cities_resolved,
        failed = summary.cities_failed,
        companies = summary.company_variants,
        "Seeding complete"
    );
    summary
}
