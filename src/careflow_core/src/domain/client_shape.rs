/// How a client expects to receive its session tokens.
///
/// Native clients get both tokens in the JSON body. Browsers get the refresh
/// token in an HTTP-only cookie and only the access token in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientShape {
    Web,
    Mobile,
}

impl ClientShape {
    /// Detect the client shape from a `User-Agent` value.
    ///
    /// A user agent containing any of `mobile_markers` is a native client;
    /// anything else, including a missing header, is treated as a browser.
    pub fn from_user_agent<S: AsRef<str>>(user_agent: Option<&str>, mobile_markers: &[S]) -> Self {
        match user_agent {
            Some(agent)
                if mobile_markers
                    .iter()
                    .any(|marker| !marker.as_ref().is_empty() && agent.contains(marker.as_ref())) =>
            {
                ClientShape::Mobile
            }
            _ => ClientShape::Web,
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, ClientShape::Mobile)
    }
}
