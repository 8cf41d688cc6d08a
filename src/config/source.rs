/// Remote tabular data package settings.
pub struct SourceConfig {
    /// Descriptor of the oil price data package
    pub datapackage_url: &'static str,
    pub timeout_ms: u64,
    /// Resource profile marking a resource as a table
    pub tabular_profile: &'static str,
    /// Suffix the package appends to the names of its CSV resources
    pub csv_resource_suffix: &'static str,
}

pub const SOURCE: SourceConfig = SourceConfig {
    datapackage_url: "https://datahub.io/core/oil-prices/datapackage.json",
    timeout_ms: 30_000,
    tabular_profile: "tabular-data-resource",
    csv_resource_suffix: "_csv",
};
