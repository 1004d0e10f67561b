// SPDX-License-Identifier: MPL-2.0
//! Built-in portfolio content.

use super::{GalleryEntry, Portfolio, Project};

const ORGCONNECT: &[&str] = &[
    "OrgConnect/Org Logo.png",
    "OrgConnect/admin_login.png",
    "OrgConnect/Calendar.png",
    "OrgConnect/Finance Details.png",
    "OrgConnect/Event Approval(OSA).png",
    "OrgConnect/2558f946-6a7d-4f64-a3f4-2174dd8960ae.jpg",
    "OrgConnect/2ade2346-e87a-44d7-a5b8-200792f051d0.jpg",
    "OrgConnect/462574664_1042241264338935_7245706792060371913_n.png",
    "OrgConnect/9ee9c237-7691-46dd-9388-89f111e794f4.jpg",
    "OrgConnect/ad2ddbef-2f20-4d0b-9faf-7df43e19785e.jpg",
    "OrgConnect/cda10b12-2502-405e-9d71-ff0d5f2ed3b7.jpg",
    "OrgConnect/photo1716524214 (2).jpeg",
];

const DEVOTION: &[&str] = &[
    "Devotion Camacop/Devotion logo.png",
    "Devotion Camacop/photo1716524214.jpeg",
    "Devotion Camacop/photo1716524214 (1).jpeg",
    "Devotion Camacop/photo1716524214 (3).jpeg",
    "Devotion Camacop/photo1716524214 (4).jpeg",
    "Devotion Camacop/photo1716524236.jpeg",
    "Devotion Camacop/photo1716526351.jpeg",
    "Devotion Camacop/photo1716704694.jpeg",
    "Devotion Camacop/Screenrecording_20240524_130339.mp4",
    "Devotion Camacop/Screenrecording_20240524_131751.mp4",
    "Devotion Camacop/Screenrecording_20240524_131901.mp4",
    "Devotion Camacop/Screenrecording_20240524_133231.mp4",
];

fn entry(name: &str, items: &[&str]) -> GalleryEntry {
    GalleryEntry {
        name: name.to_string(),
        items: items.iter().map(|s| (*s).to_string()).collect(),
    }
}

pub(super) fn portfolio() -> Portfolio {
    Portfolio {
        projects: vec![
            Project {
                title: "OrgConnect".to_string(),
                description: "Student organization management: event approval, \
                              finance tracking and a shared calendar."
                    .to_string(),
                gallery: "orgconnect".to_string(),
            },
            Project {
                title: "Devotion Camacop".to_string(),
                description: "Daily devotion app for the CAMACOP community.".to_string(),
                gallery: "devotion".to_string(),
            },
        ],
        galleries: vec![entry("orgconnect", ORGCONNECT), entry("devotion", DEVOTION)],
    }
}
