use super::geo::Waypoint;

/// Default primary-production origin for a material.
///
/// The lookup is case-sensitive on the canonical label; anything else maps
/// to the "Unknown Origin" fallback point.
pub(crate) fn default_origin(material: &str) -> Waypoint {
    match material {
        "Wool" => Waypoint::new(-33.8688, 151.2093, "New South Wales, Australia", "Australia"),
        "Silk" => Waypoint::new(30.2672, 120.1532, "Hangzhou, China", "China"),
        "Linen" => Waypoint::new(49.6116, 0.7234, "Normandy, France", "France"),
        "Cotton" => Waypoint::new(33.5731, -101.8552, "Texas, USA", "USA"),
        "Cashmere" => Waypoint::new(43.8256, 87.6168, "Xinjiang, China", "China"),
        "Mohair" => Waypoint::new(-33.9249, 18.4241, "Western Cape, South Africa", "South Africa"),
        "Vicuna" => Waypoint::new(-12.0464, -77.0428, "Andes, Peru", "Peru"),
        _ => Waypoint::new(41.9028, 12.4964, "Unknown Origin", "Unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_materials_resolve_to_their_region() {
        assert_eq!(default_origin("Wool").country, "Australia");
        assert_eq!(default_origin("Silk").name, "Hangzhou, China");
        assert_eq!(default_origin("Vicuna").country, "Peru");
    }

    #[test]
    fn lookup_is_case_sensitive_with_unknown_fallback() {
        assert_eq!(default_origin("wool").name, "Unknown Origin");
        assert_eq!(default_origin("Polyester").name, "Unknown Origin");
        assert_eq!(default_origin("").country, "Unknown");
    }
}
