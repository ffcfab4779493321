//! Curated facility knowledge base.
//!
//! A handful of (city, facility kind) branches with hand-picked entries.
//! Matching is substring containment on the lower-cased query. A branch can
//! name suppressor keywords: when the query also mentions a more specific
//! specialty, the broader branch stays silent so the specialty branch owns
//! the result.

use crate::models::Facility;

/// One (city, facility kind) combination.
#[derive(Debug, Clone)]
pub struct CatalogBranch {
    /// Any of these must appear in the query.
    pub cities: &'static [&'static str],
    /// Any of these must appear in the query.
    pub triggers: &'static [&'static str],
    /// None of these may appear in the query.
    pub suppressors: &'static [&'static str],
    pub entries: Vec<Facility>,
}

impl CatalogBranch {
    fn matches(&self, lower_query: &str) -> bool {
        self.cities.iter().any(|c| lower_query.contains(c))
            && self.triggers.iter().any(|t| lower_query.contains(t))
            && !self.suppressors.iter().any(|s| lower_query.contains(s))
    }
}

/// Immutable, process-wide catalog. Built once and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FacilityCatalog {
    branches: Vec<CatalogBranch>,
}

impl FacilityCatalog {
    pub fn new(branches: Vec<CatalogBranch>) -> Self {
        Self { branches }
    }

    /// The curated Pune / New York / London data set.
    pub fn curated() -> Self {
        let mut branches = pune_branches();
        branches.extend(new_york_branches());
        branches.extend(london_branches());
        Self::new(branches)
    }

    /// All entries of every matching branch, in branch order.
    ///
    /// Expects a lower-cased query. Returns an empty list on no match.
    pub fn lookup(&self, lower_query: &str) -> Vec<Facility> {
        self.branches
            .iter()
            .filter(|branch| branch.matches(lower_query))
            .flat_map(|branch| branch.entries.iter().cloned())
            .collect()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

impl Default for FacilityCatalog {
    fn default() -> Self {
        Self::curated()
    }
}

const PUNE: &[&str] = &["pune"];
const NEW_YORK: &[&str] = &["new york", "nyc"];
const LONDON: &[&str] = &["london"];

fn pune_branches() -> Vec<CatalogBranch> {
    vec![
        CatalogBranch {
            cities: PUNE,
            triggers: &["hospital"],
            suppressors: &["oncologist", "cancer", "surgeon", "surgery"],
            entries: vec![
                Facility::new(
                    "Sahyadri Super Speciality Hospital Deccan",
                    "Plot No. 30-C, Erandwane, Deccan Gymkhana, Pune, Maharashtra 411004",
                    "Super Speciality Hospital",
                ),
                Facility::new(
                    "Jehangir Hospital",
                    "32, Sassoon Rd, Opposite Pune Railway Station, Central Excise Colony, Sangamvadi, Pune, Maharashtra 411001",
                    "Multi-Speciality Hospital",
                ),
                Facility::new(
                    "Noble Hospital",
                    "153, Magarpatta Road, Hadapsar, Pune, Maharashtra 411013",
                    "Multi-Speciality Hospital",
                ),
                Facility::new(
                    "KEM Hospital",
                    "489, Rasta Peth, Sardar Moodliar Rd, Pune, Maharashtra 411011",
                    "General Hospital",
                ),
            ],
        },
        CatalogBranch {
            cities: PUNE,
            triggers: &["clinic"],
            suppressors: &["pediatric", "cardiologist", "dermatologist", "oncologist", "surgeon"],
            entries: vec![
                Facility::new(
                    "Dr. Joshi's Family Clinic",
                    "Shop No 5, Near Balgandharva Chowk, FC Road, Shivajinagar, Pune, Maharashtra 411005",
                    "General Clinic",
                ),
                Facility::new(
                    "Wellness First Polyclinic",
                    "North Main Road, Koregaon Park, Pune, Maharashtra 411001",
                    "Polyclinic",
                ),
                Facility::new(
                    "Care & Cure Clinic",
                    "Viman Nagar Rd, Clover Park, Viman Nagar, Pune, Maharashtra 411014",
                    "Family Clinic",
                ),
            ],
        },
        CatalogBranch {
            cities: PUNE,
            triggers: &["cardiologist"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "Deccan Heart Institute",
                    "Deccan Gymkhana, Pune, Maharashtra 411004",
                    "Cardiology Hospital",
                ),
                Facility::new(
                    "Dr. Rahul Patil - Cardiologist Clinic",
                    "Tilak Road, Swargate, Pune, Maharashtra 411030",
                    "Cardiologist Clinic",
                ),
            ],
        },
        CatalogBranch {
            cities: PUNE,
            triggers: &["pediatrician", "child specialist"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "Cloudnine Hospital - Shivajinagar (Pediatrics)",
                    "Plot No. 47, Service Road, Shivajinagar, Pune, Maharashtra 411005",
                    "Pediatric & Maternity Hospital",
                ),
                Facility::new(
                    "Dr. Mehta's Children's Clinic",
                    "Aundh-Wakad Road, Aundh, Pune, Maharashtra 411007",
                    "Pediatric Clinic",
                ),
            ],
        },
        CatalogBranch {
            cities: PUNE,
            triggers: &["oncologist", "cancer"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "Galaxy CARE Hospital (Oncology Dept.)",
                    "S.No.23, Plot No.207, Karve Rd, Deccan Gymkhana, Pune, Maharashtra 411004",
                    "Oncology Hospital / Cancer Care",
                ),
                Facility::new(
                    "Ruby Hall Clinic (Cancer Center)",
                    "40, Sassoon Rd, Sangamvadi, Pune, Maharashtra 411001",
                    "Comprehensive Cancer Center",
                ),
                Facility::new(
                    "Chellaram Hospital - Diabetes Care & Multi-Speciality (Oncology Wing)",
                    "Lalani Quantum, Bavdhan, Pune, Maharashtra 411021",
                    "Hospital with Oncology Dept.",
                ),
            ],
        },
        CatalogBranch {
            cities: PUNE,
            triggers: &["surgeon", "surgery"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "Sahyadri Super Speciality Hospital Deccan (Advanced Surgery)",
                    "Plot No. 30-C, Erandwane, Deccan Gymkhana, Pune, Maharashtra 411004",
                    "Hospital - Surgical Services",
                ),
                Facility::new(
                    "Jehangir Hospital (Dept. of Surgery)",
                    "32, Sassoon Rd, Opposite Pune Railway Station, Central Excise Colony, Sangamvadi, Pune, Maharashtra 411001",
                    "Hospital - Surgical Services",
                ),
                Facility::new(
                    "Poona Hospital and Research Centre (Surgical Unit)",
                    "27, Sadashiv Peth, Near Alka Talkies, Pune, Maharashtra 411030",
                    "Hospital with Surgical Unit",
                ),
            ],
        },
    ]
}

fn new_york_branches() -> Vec<CatalogBranch> {
    vec![
        CatalogBranch {
            cities: NEW_YORK,
            triggers: &["hospital"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "NewYork-Presbyterian/Weill Cornell Medical Center",
                    "525 E 68th St, New York, NY 10065",
                    "Hospital",
                ),
                Facility::new(
                    "Mount Sinai Hospital",
                    "1 Gustave L Levy Pl, New York, NY 10029",
                    "Hospital",
                ),
                Facility::new(
                    "NYU Langone Health",
                    "550 1st Avenue, New York, NY 10016",
                    "Academic Medical Center",
                ),
            ],
        },
        CatalogBranch {
            cities: NEW_YORK,
            triggers: &["pediatrician", "child specialist"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "Tribeca Pediatrics - Warren Street",
                    "46 Warren St, New York, NY 10007",
                    "Pediatric Clinic",
                ),
                Facility::new(
                    "CPW Pediatrics",
                    "251 Central Park West, New York, NY 10024",
                    "Pediatric Clinic",
                ),
            ],
        },
        CatalogBranch {
            cities: NEW_YORK,
            triggers: &["urgent care"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "CityMD West 57th St Urgent Care - NYC",
                    "315 W 57th St, New York, NY 10019",
                    "Urgent Care Clinic",
                ),
                Facility::new(
                    "GoHealth Urgent Care - Upper West Side",
                    "2628 Broadway, New York, NY 10025",
                    "Urgent Care Clinic",
                ),
            ],
        },
    ]
}

fn london_branches() -> Vec<CatalogBranch> {
    vec![
        CatalogBranch {
            cities: LONDON,
            triggers: &["hospital"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "St Thomas' Hospital",
                    "Westminster Bridge Rd, Lambeth, London SE1 7EH, UK",
                    "NHS Hospital",
                ),
                Facility::new(
                    "University College Hospital at Westmoreland Street",
                    "16-18 Westmoreland St, London W1G 8PH, UK",
                    "NHS Hospital",
                ),
                Facility::new(
                    "The Royal London Hospital",
                    "Whitechapel Rd, London E1 1BB, UK",
                    "NHS Hospital",
                ),
            ],
        },
        CatalogBranch {
            cities: LONDON,
            triggers: &["clinic"],
            suppressors: &["dermatologist"],
            entries: vec![
                Facility::new(
                    "The London General Practice",
                    "114a Harley St, London W1G 7JL, UK",
                    "Private GP Clinic",
                ),
                Facility::new(
                    "Soho Square General Practice",
                    "1 Frith St, London W1D 3HZ, UK",
                    "NHS GP Clinic",
                ),
            ],
        },
        CatalogBranch {
            cities: LONDON,
            triggers: &["dermatologist"],
            suppressors: &[],
            entries: vec![
                Facility::new(
                    "The London Skin and Hair Clinic",
                    "233 High Holborn, London WC1V 7DN, UK",
                    "Dermatology Clinic",
                ),
                Facility::new(
                    "Cadogan Clinic (Dermatology)",
                    "120 Sloane St, London SW1X 9BW, UK",
                    "Private Dermatology Clinic",
                ),
            ],
        },
    ]
}
