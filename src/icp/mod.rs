pub mod definition;
pub mod parser;
pub mod quality;
pub mod templates;

pub use definition::{CriteriaGroup, IcpDefinition};
pub use parser::{parse, NumericRange, ParsedIcp, TokenSet};
pub use quality::{
    check_icp_quality, estimate_market_size, validate_icp, Breadth, IcpQualityReport,
    IcpValidation, MarketSize,
};
pub use templates::IcpTemplate;
