use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::model::Headers;

/// How a parameter table is keyed in the store, and therefore how its
/// records are expanded against the points of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Model,          // All rows of the model, no point dependency
    Zone,           // (zone)
    AgentZone,      // (agent, zone)
    ZoneType,       // (type, zone)
    AgentZoneType,  // (agent, type, zone)
}

impl Scope {
    #[inline] pub fn has_agent(&self) -> bool { matches!(self, Self::AgentZone | Self::AgentZoneType) }

    #[inline] pub fn has_type(&self) -> bool { matches!(self, Self::ZoneType | Self::AgentZoneType) }

    #[inline] pub fn has_zone(&self) -> bool { !matches!(self, Self::Model) }

    /// Number of key columns leading each stored row (and each emitted record).
    pub fn key_width(&self) -> usize {
        self.has_agent() as usize + self.has_type() as usize + self.has_zone() as usize
    }
}

/// The parameter relations consumed by the simulation engine.
/// Declaration order is alphabetical, which fixes output ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Agents,
    AgentsZones,
    BidsAdjustments,
    BidsFunctions,
    Demand,
    DemandExogenousCutoff,
    RealEstatesZones,
    RentAdjustments,
    RentFunctions,
    Subsidies,
    Supply,
    Zones,
}

impl TableName {
    /// Tables produced for every request.
    pub const CORE: [TableName; 10] = [
        Self::Agents,
        Self::AgentsZones,
        Self::BidsAdjustments,
        Self::BidsFunctions,
        Self::Demand,
        Self::DemandExogenousCutoff,
        Self::RealEstatesZones,
        Self::RentAdjustments,
        Self::RentFunctions,
        Self::Zones,
    ];

    /// Tables produced only when extended output is enabled.
    pub const EXTENDED: [TableName; 2] = [Self::Subsidies, Self::Supply];

    pub const ALL: [TableName; 12] = [
        Self::Agents,
        Self::AgentsZones,
        Self::BidsAdjustments,
        Self::BidsFunctions,
        Self::Demand,
        Self::DemandExogenousCutoff,
        Self::RealEstatesZones,
        Self::RentAdjustments,
        Self::RentFunctions,
        Self::Subsidies,
        Self::Supply,
        Self::Zones,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agents                => "agents",
            Self::AgentsZones           => "agents_zones",
            Self::BidsAdjustments       => "bids_adjustments",
            Self::BidsFunctions         => "bids_functions",
            Self::Demand                => "demand",
            Self::DemandExogenousCutoff => "demand_exogenous_cutoff",
            Self::RealEstatesZones      => "real_estates_zones",
            Self::RentAdjustments       => "rent_adjustments",
            Self::RentFunctions         => "rent_functions",
            Self::Subsidies             => "subsidies",
            Self::Supply                => "supply",
            Self::Zones                 => "zones",
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Self::Agents | Self::BidsFunctions | Self::Demand | Self::RentFunctions => Scope::Model,
            Self::Zones => Scope::Zone,
            Self::AgentsZones => Scope::AgentZone,
            Self::RealEstatesZones | Self::RentAdjustments | Self::Supply => Scope::ZoneType,
            Self::BidsAdjustments | Self::DemandExogenousCutoff | Self::Subsidies => Scope::AgentZoneType,
        }
    }

    /// Constant leading columns of the emitted table.
    pub fn fixed_header(&self) -> &'static [&'static str] {
        match self {
            Self::Agents => &["IDAGENT", "IDMARKET", "IDAGGRA", "UPPERBB"],
            Self::AgentsZones => &["H_IDX", "I_IDX"],
            Self::BidsAdjustments => &["H_IDX", "V_IDX", "I_IDX", "BIDADJ"],
            Self::BidsFunctions => &[
                "IDMARKET", "IDAGGRA", "IDATTRIB", "LINEAPAR",
                "CAGENT_X", "CREST_X", "CACC_X", "CZONES_X", "EXPPAR_X",
                "CAGENT_Y", "CREST_Y", "CACC_Y", "CZONES_Y", "EXPPAR_Y",
            ],
            Self::Demand => &["H_IDX", "DEMAND"],
            Self::DemandExogenousCutoff => &["H_IDX", "V_IDX", "I_IDX", "DCUTOFF"],
            Self::RealEstatesZones => &["V_IDX", "I_IDX", "M_IDX"],
            Self::RentAdjustments => &["V_IDX", "I_IDX", "RENTADJ"],
            Self::RentFunctions => &[
                "IDMARKET", "IDATTRIB", "SCALEPAR", "LINEAPAR",
                "CREST_X", "CZONES_X", "EXPPAR_X", "CREST_Y", "CZONES_Y", "EXPPAR_Y",
            ],
            Self::Subsidies => &["H_IDX", "V_IDX", "I_IDX", "SUBSIDIES"],
            Self::Supply => &["V_IDX", "I_IDX", "NREST"],
            Self::Zones => &["I_IDX"],
        }
    }

    /// Model-specific trailing columns, empty for fixed-width tables.
    pub fn variable_header<'a>(&self, headers: &'a Headers) -> &'a [String] {
        match self {
            Self::Zones => &headers.zones,
            Self::Agents => &headers.agents,
            Self::AgentsZones => &headers.agents_zones,
            Self::RealEstatesZones => &headers.real_estates_zones,
            _ => &[],
        }
    }

    /// Full header of the emitted table for a model.
    pub fn header(&self, headers: &Headers) -> Vec<String> {
        self.fixed_header().iter()
            .map(|name| name.to_string())
            .chain(self.variable_header(headers).iter().cloned())
            .collect()
    }

    /// Width of the stored payload following the key columns.
    pub fn payload_width(&self, headers: &Headers) -> usize {
        self.fixed_header().len() + self.variable_header(headers).len() - self.scope().key_width()
    }

    /// Whether a store may omit this table entirely.
    #[inline] pub fn is_optional(&self) -> bool { Self::EXTENDED.contains(self) }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| anyhow!("Unknown table: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_headers() -> Headers {
        Headers {
            zones: vec!["INDAREA".into(), "COMAREA".into()],
            agents: vec!["HHINC".into()],
            agents_zones: vec!["ACC".into(), "P_LN_ATT".into()],
            real_estates_zones: vec!["LOTSIZE".into(), "BUILT".into(), "IS_HOUSE".into()],
        }
    }

    #[test]
    fn core_and_extended_partition_all() {
        assert_eq!(TableName::CORE.len() + TableName::EXTENDED.len(), TableName::ALL.len());
        for name in TableName::ALL {
            assert!(TableName::CORE.contains(&name) ^ TableName::EXTENDED.contains(&name), "{name}");
        }
        assert!(TableName::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn names_round_trip_through_str() {
        for name in TableName::ALL {
            assert_eq!(name.as_str().parse::<TableName>().unwrap(), name);
        }
        assert!("parcels".parse::<TableName>().is_err());
    }

    #[test]
    fn serde_name_matches_file_stem() {
        for name in TableName::ALL {
            assert_eq!(serde_json::to_string(&name).unwrap(), format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn headers_append_model_columns() {
        let headers = make_test_headers();
        assert_eq!(TableName::Zones.header(&headers), vec!["I_IDX", "INDAREA", "COMAREA"]);
        assert_eq!(
            TableName::RealEstatesZones.header(&headers),
            vec!["V_IDX", "I_IDX", "M_IDX", "LOTSIZE", "BUILT", "IS_HOUSE"],
        );
        assert_eq!(TableName::RentAdjustments.header(&headers), vec!["V_IDX", "I_IDX", "RENTADJ"]);
    }

    #[test]
    fn payload_excludes_key_columns() {
        let headers = make_test_headers();
        assert_eq!(TableName::Zones.payload_width(&headers), 2);
        assert_eq!(TableName::AgentsZones.payload_width(&headers), 2);
        assert_eq!(TableName::BidsAdjustments.payload_width(&headers), 1);
        assert_eq!(TableName::RealEstatesZones.payload_width(&headers), 4); // M_IDX + data
        assert_eq!(TableName::Agents.payload_width(&headers), 5);
        assert_eq!(TableName::BidsFunctions.payload_width(&headers), 14);
    }

    #[test]
    fn key_widths_per_scope() {
        assert_eq!(Scope::Model.key_width(), 0);
        assert_eq!(Scope::Zone.key_width(), 1);
        assert_eq!(Scope::AgentZone.key_width(), 2);
        assert_eq!(Scope::ZoneType.key_width(), 2);
        assert_eq!(Scope::AgentZoneType.key_width(), 3);
    }
}
