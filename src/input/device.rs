/// Identification of the hardware the surface runs on.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceInfo {
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
}

impl DeviceInfo {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
        }
    }

    /// Whether the vendor low-latency pen subsystem should be attempted.
    ///
    /// Onyx ships it on its Boox e-paper line; older firmware reports the brand as manufacturer.
    pub fn supports_low_latency(&self) -> bool {
        let m = self.manufacturer.to_lowercase();
        m.contains("onyx") || m.contains("boox")
    }
}
