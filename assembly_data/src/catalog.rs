// Static catalogs: the assemblies a deployment covers, the dashboard pages
// and the admin sections. Allow-lists in user records refer to these ids.

use serde::Serialize;

use crate::model::AssemblyId;

/// An assembly constituency known to the deployment.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub struct Assembly {
    pub id: &'static str,
    pub name: &'static str,
}

/// A dashboard page a client can be granted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub struct DashboardPage {
    pub id: &'static str,
    pub label: &'static str,
}

/// An admin dashboard section.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub struct AdminSection {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(rename = "superAdminOnly")]
    pub super_admin_only: bool,
}

pub const ASSEMBLIES: [Assembly; 30] = [
    Assembly { id: "1", name: "Mannadipet" },
    Assembly { id: "2", name: "Thirubhuvanai (SC)" },
    Assembly { id: "3", name: "Ossudu (SC)" },
    Assembly { id: "4", name: "Mangalam" },
    Assembly { id: "5", name: "Villianur" },
    Assembly { id: "6", name: "Ozhukarai" },
    Assembly { id: "7", name: "Kadirkamam" },
    Assembly { id: "8", name: "Indira Nagar" },
    Assembly { id: "9", name: "Thattanchavady" },
    Assembly { id: "10", name: "Kamaraj Nagar" },
    Assembly { id: "11", name: "Lawspet" },
    Assembly { id: "12", name: "Kalapet" },
    Assembly { id: "13", name: "Muthialpet" },
    Assembly { id: "14", name: "Raj Bhavan" },
    Assembly { id: "15", name: "Oupalam" },
    Assembly { id: "16", name: "Orleampeth" },
    Assembly { id: "17", name: "Nellithope" },
    Assembly { id: "18", name: "Mudaliarpet" },
    Assembly { id: "19", name: "Ariankuppam" },
    Assembly { id: "20", name: "Manavely" },
    Assembly { id: "21", name: "Embalam (SC)" },
    Assembly { id: "22", name: "Nettapakkam (SC)" },
    Assembly { id: "23", name: "Bahour" },
    Assembly { id: "24", name: "Nedungadu (SC)" },
    Assembly { id: "25", name: "Thirunallar" },
    Assembly { id: "26", name: "Karaikal North" },
    Assembly { id: "27", name: "Karaikal South" },
    Assembly { id: "28", name: "Neravy T R Pattinam" },
    Assembly { id: "29", name: "Mahe" },
    Assembly { id: "30", name: "Yanam" },
];

pub const DASHBOARD_PAGES: [DashboardPage; 6] = [
    DashboardPage { id: "overview", label: "Assembly Overview" },
    DashboardPage { id: "political-history", label: "Political History & Dynamics" },
    DashboardPage { id: "retro-booths", label: "Retro-Booths & Heat Maps" },
    DashboardPage { id: "candidates", label: "Candidate Panel" },
    DashboardPage { id: "current-scenario", label: "Current Political Scenario" },
    DashboardPage { id: "survey", label: "Survey" },
];

pub const ADMIN_SECTIONS: [AdminSection; 11] = [
    AdminSection { id: "stations", label: "Polling Stations", super_admin_only: false },
    AdminSection { id: "users", label: "User Management", super_admin_only: true },
    AdminSection { id: "mlas", label: "MLAs / Winners", super_admin_only: false },
    AdminSection { id: "elections", label: "Election Data", super_admin_only: false },
    AdminSection { id: "candidates", label: "Candidates", super_admin_only: false },
    AdminSection { id: "survey", label: "Survey Data", super_admin_only: false },
    AdminSection { id: "meta", label: "Assembly Data", super_admin_only: false },
    AdminSection { id: "retrobooths", label: "Retro Booths Page", super_admin_only: false },
    AdminSection { id: "politicalhistory", label: "Political History", super_admin_only: false },
    AdminSection { id: "assemblyoverview", label: "Assembly Overview", super_admin_only: false },
    AdminSection { id: "widgets", label: "Widget Config", super_admin_only: false },
];

/// Display name of an assembly, with a generic fallback for ids outside the
/// catalog. Ids are compared canonically.
pub fn assembly_name(id: &str) -> String {
    let wanted = AssemblyId::new(id);
    ASSEMBLIES
        .iter()
        .find(|a| AssemblyId::new(a.id) == wanted)
        .map(|a| a.name.to_string())
        .unwrap_or_else(|| format!("Assembly {}", wanted))
}
