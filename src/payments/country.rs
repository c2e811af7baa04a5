//! ISO 3166-1 country code lookup

use crate::payments::traits::CountryLookup;

/// (English short name, alpha-2, alpha-3)
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("Afghanistan", "AF", "AFG"),
    ("Åland Islands", "AX", "ALA"),
    ("Albania", "AL", "ALB"),
    ("Algeria", "DZ", "DZA"),
    ("American Samoa", "AS", "ASM"),
    ("Andorra", "AD", "AND"),
    ("Angola", "AO", "AGO"),
    ("Anguilla", "AI", "AIA"),
    ("Antarctica", "AQ", "ATA"),
    ("Antigua and Barbuda", "AG", "ATG"),
    ("Argentina", "AR", "ARG"),
    ("Armenia", "AM", "ARM"),
    ("Aruba", "AW", "ABW"),
    ("Australia", "AU", "AUS"),
    ("Austria", "AT", "AUT"),
    ("Azerbaijan", "AZ", "AZE"),
    ("Bahamas", "BS", "BHS"),
    ("Bahrain", "BH", "BHR"),
    ("Bangladesh", "BD", "BGD"),
    ("Barbados", "BB", "BRB"),
    ("Belarus", "BY", "BLR"),
    ("Belgium", "BE", "BEL"),
    ("Belize", "BZ", "BLZ"),
    ("Benin", "BJ", "BEN"),
    ("Bermuda", "BM", "BMU"),
    ("Bhutan", "BT", "BTN"),
    ("Bolivia", "BO", "BOL"),
    ("Bonaire, Sint Eustatius and Saba", "BQ", "BES"),
    ("Bosnia and Herzegovina", "BA", "BIH"),
    ("Botswana", "BW", "BWA"),
    ("Bouvet Island", "BV", "BVT"),
    ("Brazil", "BR", "BRA"),
    ("British Indian Ocean Territory", "IO", "IOT"),
    ("Brunei Darussalam", "BN", "BRN"),
    ("Bulgaria", "BG", "BGR"),
    ("Burkina Faso", "BF", "BFA"),
    ("Burundi", "BI", "BDI"),
    ("Cabo Verde", "CV", "CPV"),
    ("Cambodia", "KH", "KHM"),
    ("Cameroon", "CM", "CMR"),
    ("Canada", "CA", "CAN"),
    ("Cayman Islands", "KY", "CYM"),
    ("Central African Republic", "CF", "CAF"),
    ("Chad", "TD", "TCD"),
    ("Chile", "CL", "CHL"),
    ("China", "CN", "CHN"),
    ("Christmas Island", "CX", "CXR"),
    ("Cocos (Keeling) Islands", "CC", "CCK"),
    ("Colombia", "CO", "COL"),
    ("Comoros", "KM", "COM"),
    ("Congo", "CG", "COG"),
    ("Congo, the Democratic Republic of the", "CD", "COD"),
    ("Cook Islands", "CK", "COK"),
    ("Costa Rica", "CR", "CRI"),
    ("Côte d'Ivoire", "CI", "CIV"),
    ("Croatia", "HR", "HRV"),
    ("Cuba", "CU", "CUB"),
    ("Curaçao", "CW", "CUW"),
    ("Cyprus", "CY", "CYP"),
    ("Czech Republic", "CZ", "CZE"),
    ("Denmark", "DK", "DNK"),
    ("Djibouti", "DJ", "DJI"),
    ("Dominica", "DM", "DMA"),
    ("Dominican Republic", "DO", "DOM"),
    ("Ecuador", "EC", "ECU"),
    ("Egypt", "EG", "EGY"),
    ("El Salvador", "SV", "SLV"),
    ("Equatorial Guinea", "GQ", "GNQ"),
    ("Eritrea", "ER", "ERI"),
    ("Estonia", "EE", "EST"),
    ("Eswatini", "SZ", "SWZ"),
    ("Ethiopia", "ET", "ETH"),
    ("Falkland Islands (Malvinas)", "FK", "FLK"),
    ("Faroe Islands", "FO", "FRO"),
    ("Fiji", "FJ", "FJI"),
    ("Finland", "FI", "FIN"),
    ("France", "FR", "FRA"),
    ("French Guiana", "GF", "GUF"),
    ("French Polynesia", "PF", "PYF"),
    ("French Southern Territories", "TF", "ATF"),
    ("Gabon", "GA", "GAB"),
    ("Gambia", "GM", "GMB"),
    ("Georgia", "GE", "GEO"),
    ("Germany", "DE", "DEU"),
    ("Ghana", "GH", "GHA"),
    ("Gibraltar", "GI", "GIB"),
    ("Greece", "GR", "GRC"),
    ("Greenland", "GL", "GRL"),
    ("Grenada", "GD", "GRD"),
    ("Guadeloupe", "GP", "GLP"),
    ("Guam", "GU", "GUM"),
    ("Guatemala", "GT", "GTM"),
    ("Guernsey", "GG", "GGY"),
    ("Guinea", "GN", "GIN"),
    ("Guinea-Bissau", "GW", "GNB"),
    ("Guyana", "GY", "GUY"),
    ("Haiti", "HT", "HTI"),
    ("Heard Island and McDonald Islands", "HM", "HMD"),
    ("Holy See (Vatican City State)", "VA", "VAT"),
    ("Honduras", "HN", "HND"),
    ("Hong Kong", "HK", "HKG"),
    ("Hungary", "HU", "HUN"),
    ("Iceland", "IS", "ISL"),
    ("India", "IN", "IND"),
    ("Indonesia", "ID", "IDN"),
    ("Iran, Islamic Republic of", "IR", "IRN"),
    ("Iraq", "IQ", "IRQ"),
    ("Ireland", "IE", "IRL"),
    ("Isle of Man", "IM", "IMN"),
    ("Israel", "IL", "ISR"),
    ("Italy", "IT", "ITA"),
    ("Jamaica", "JM", "JAM"),
    ("Japan", "JP", "JPN"),
    ("Jersey", "JE", "JEY"),
    ("Jordan", "JO", "JOR"),
    ("Kazakhstan", "KZ", "KAZ"),
    ("Kenya", "KE", "KEN"),
    ("Kiribati", "KI", "KIR"),
    ("Korea, Democratic People's Republic of", "KP", "PRK"),
    ("Korea, Republic of", "KR", "KOR"),
    ("Kuwait", "KW", "KWT"),
    ("Kyrgyzstan", "KG", "KGZ"),
    ("Lao People's Democratic Republic", "LA", "LAO"),
    ("Latvia", "LV", "LVA"),
    ("Lebanon", "LB", "LBN"),
    ("Lesotho", "LS", "LSO"),
    ("Liberia", "LR", "LBR"),
    ("Libya", "LY", "LBY"),
    ("Liechtenstein", "LI", "LIE"),
    ("Lithuania", "LT", "LTU"),
    ("Luxembourg", "LU", "LUX"),
    ("Macao", "MO", "MAC"),
    ("Madagascar", "MG", "MDG"),
    ("Malawi", "MW", "MWI"),
    ("Malaysia", "MY", "MYS"),
    ("Maldives", "MV", "MDV"),
    ("Mali", "ML", "MLI"),
    ("Malta", "MT", "MLT"),
    ("Marshall Islands", "MH", "MHL"),
    ("Martinique", "MQ", "MTQ"),
    ("Mauritania", "MR", "MRT"),
    ("Mauritius", "MU", "MUS"),
    ("Mayotte", "YT", "MYT"),
    ("Mexico", "MX", "MEX"),
    ("Micronesia, Federated States of", "FM", "FSM"),
    ("Moldova, Republic of", "MD", "MDA"),
    ("Monaco", "MC", "MCO"),
    ("Mongolia", "MN", "MNG"),
    ("Montenegro", "ME", "MNE"),
    ("Montserrat", "MS", "MSR"),
    ("Morocco", "MA", "MAR"),
    ("Mozambique", "MZ", "MOZ"),
    ("Myanmar", "MM", "MMR"),
    ("Namibia", "NA", "NAM"),
    ("Nauru", "NR", "NRU"),
    ("Nepal", "NP", "NPL"),
    ("Netherlands", "NL", "NLD"),
    ("New Caledonia", "NC", "NCL"),
    ("New Zealand", "NZ", "NZL"),
    ("Nicaragua", "NI", "NIC"),
    ("Niger", "NE", "NER"),
    ("Nigeria", "NG", "NGA"),
    ("Niue", "NU", "NIU"),
    ("Norfolk Island", "NF", "NFK"),
    ("North Macedonia", "MK", "MKD"),
    ("Northern Mariana Islands", "MP", "MNP"),
    ("Norway", "NO", "NOR"),
    ("Oman", "OM", "OMN"),
    ("Pakistan", "PK", "PAK"),
    ("Palau", "PW", "PLW"),
    ("Palestine, State of", "PS", "PSE"),
    ("Panama", "PA", "PAN"),
    ("Papua New Guinea", "PG", "PNG"),
    ("Paraguay", "PY", "PRY"),
    ("Peru", "PE", "PER"),
    ("Philippines", "PH", "PHL"),
    ("Pitcairn", "PN", "PCN"),
    ("Poland", "PL", "POL"),
    ("Portugal", "PT", "PRT"),
    ("Puerto Rico", "PR", "PRI"),
    ("Qatar", "QA", "QAT"),
    ("Réunion", "RE", "REU"),
    ("Romania", "RO", "ROU"),
    ("Russian Federation", "RU", "RUS"),
    ("Rwanda", "RW", "RWA"),
    ("Saint Barthélemy", "BL", "BLM"),
    ("Saint Helena, Ascension and Tristan da Cunha", "SH", "SHN"),
    ("Saint Kitts and Nevis", "KN", "KNA"),
    ("Saint Lucia", "LC", "LCA"),
    ("Saint Martin (French part)", "MF", "MAF"),
    ("Saint Pierre and Miquelon", "PM", "SPM"),
    ("Saint Vincent and the Grenadines", "VC", "VCT"),
    ("Samoa", "WS", "WSM"),
    ("San Marino", "SM", "SMR"),
    ("Sao Tome and Principe", "ST", "STP"),
    ("Saudi Arabia", "SA", "SAU"),
    ("Senegal", "SN", "SEN"),
    ("Serbia", "RS", "SRB"),
    ("Seychelles", "SC", "SYC"),
    ("Sierra Leone", "SL", "SLE"),
    ("Singapore", "SG", "SGP"),
    ("Sint Maarten (Dutch part)", "SX", "SXM"),
    ("Slovakia", "SK", "SVK"),
    ("Slovenia", "SI", "SVN"),
    ("Solomon Islands", "SB", "SLB"),
    ("Somalia", "SO", "SOM"),
    ("South Africa", "ZA", "ZAF"),
    ("South Georgia and the South Sandwich Islands", "GS", "SGS"),
    ("South Sudan", "SS", "SSD"),
    ("Spain", "ES", "ESP"),
    ("Sri Lanka", "LK", "LKA"),
    ("Sudan", "SD", "SDN"),
    ("Suriname", "SR", "SUR"),
    ("Svalbard and Jan Mayen", "SJ", "SJM"),
    ("Sweden", "SE", "SWE"),
    ("Switzerland", "CH", "CHE"),
    ("Syrian Arab Republic", "SY", "SYR"),
    ("Taiwan", "TW", "TWN"),
    ("Tajikistan", "TJ", "TJK"),
    ("Tanzania, United Republic of", "TZ", "TZA"),
    ("Thailand", "TH", "THA"),
    ("Timor-Leste", "TL", "TLS"),
    ("Togo", "TG", "TGO"),
    ("Tokelau", "TK", "TKL"),
    ("Tonga", "TO", "TON"),
    ("Trinidad and Tobago", "TT", "TTO"),
    ("Tunisia", "TN", "TUN"),
    ("Turkey", "TR", "TUR"),
    ("Turkmenistan", "TM", "TKM"),
    ("Turks and Caicos Islands", "TC", "TCA"),
    ("Tuvalu", "TV", "TUV"),
    ("Uganda", "UG", "UGA"),
    ("Ukraine", "UA", "UKR"),
    ("United Arab Emirates", "AE", "ARE"),
    ("United Kingdom", "GB", "GBR"),
    ("United States", "US", "USA"),
    ("United States Minor Outlying Islands", "UM", "UMI"),
    ("Uruguay", "UY", "URY"),
    ("Uzbekistan", "UZ", "UZB"),
    ("Vanuatu", "VU", "VUT"),
    ("Venezuela", "VE", "VEN"),
    ("Viet Nam", "VN", "VNM"),
    ("Virgin Islands, British", "VG", "VGB"),
    ("Virgin Islands, U.S.", "VI", "VIR"),
    ("Wallis and Futuna", "WF", "WLF"),
    ("Western Sahara", "EH", "ESH"),
    ("Yemen", "YE", "YEM"),
    ("Zambia", "ZM", "ZMB"),
    ("Zimbabwe", "ZW", "ZWE"),
];

/// Static lookup over the ISO 3166-1 table
///
/// Matches the English short name, alpha-2 or alpha-3 code, ignoring case and
/// surrounding whitespace, and always answers with the alpha-2 code. ISO
/// numeric codes are not recognised and fall through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCountryLookup;

impl IsoCountryLookup {
    pub fn new() -> Self {
        Self
    }
}

impl CountryLookup for IsoCountryLookup {
    fn lookup(&self, name_or_code: &str) -> Option<String> {
        let needle = name_or_code.trim();
        if needle.is_empty() {
            return None;
        }

        let lowered = needle.to_lowercase();

        COUNTRIES
            .iter()
            .find(|(name, alpha2, alpha3)| {
                let code_match = match needle.len() {
                    2 => alpha2.eq_ignore_ascii_case(needle),
                    3 => alpha3.eq_ignore_ascii_case(needle),
                    _ => false,
                };
                code_match || name.to_lowercase() == lowered
            })
            .map(|(_, alpha2, _)| alpha2.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("Canada").as_deref(), Some("CA"));
        assert_eq!(lookup.lookup("united states").as_deref(), Some("US"));
        assert_eq!(lookup.lookup("  Germany ").as_deref(), Some("DE"));
    }

    #[test]
    fn test_lookup_by_code() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("ca").as_deref(), Some("CA"));
        assert_eq!(lookup.lookup("GBR").as_deref(), Some("GB"));
    }

    #[test]
    fn test_lookup_accented_name() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("Réunion").as_deref(), Some("RE"));
    }

    #[test]
    fn test_lookup_unknown() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("Atlantis"), None);
        assert_eq!(lookup.lookup("XX"), None);
        assert_eq!(lookup.lookup(""), None);
    }

    #[test]
    fn test_lookup_mixed_case_alpha3_and_name() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("cAn").as_deref(), Some("CA"));
        assert_eq!(lookup.lookup("NEW ZEALAND").as_deref(), Some("NZ"));
    }

    #[test]
    fn test_numeric_codes_are_not_matched() {
        let lookup = IsoCountryLookup::new();
        assert_eq!(lookup.lookup("124"), None);
        assert_eq!(lookup.lookup("840"), None);
    }

    #[test]
    fn test_table_codes_are_well_formed() {
        for (name, alpha2, alpha3) in COUNTRIES {
            assert_eq!(alpha2.len(), 2, "{}", name);
            assert_eq!(alpha3.len(), 3, "{}", name);
        }
    }
}
