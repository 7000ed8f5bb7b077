/// RFC 2865 Section 5 data types, used by the standard dictionary to pick a codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// UTF-8 text, 1-253 octets
    Text,
    /// Binary data, 1-253 octets
    Octets,
    /// 32-bit IPv4 address
    Address,
    /// 32-bit unsigned integer (also used for `time` values)
    Integer,
}

macro_rules! attribute_types {
    ($($(#[$doc:meta])* $variant:ident = $value:literal, $name:literal, $data:ident;)+) => {
        /// RADIUS Attribute Types as defined in RFC 2865 and related RFCs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum AttributeType {
            $($(#[$doc])* $variant = $value,)+
        }

        impl AttributeType {
            /// Every known attribute type, in type-tag order
            pub const ALL: &'static [AttributeType] = &[$(AttributeType::$variant,)+];

            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($value => Some(AttributeType::$variant),)+
                    _ => None,
                }
            }

            /// Dictionary name, e.g. `User-Name`
            pub fn name(self) -> &'static str {
                match self {
                    $(AttributeType::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(AttributeType::$variant),)+
                    _ => None,
                }
            }

            pub fn data_type(self) -> DataType {
                match self {
                    $(AttributeType::$variant => DataType::$data,)+
                }
            }
        }
    };
}

attribute_types! {
    /// User-Name (1) - RFC 2865
    UserName = 1, "User-Name", Text;
    /// User-Password (2) - RFC 2865, hidden with the shared secret
    UserPassword = 2, "User-Password", Octets;
    /// CHAP-Password (3) - RFC 2865
    ChapPassword = 3, "CHAP-Password", Octets;
    NasIpAddress = 4, "NAS-IP-Address", Address;
    NasPort = 5, "NAS-Port", Integer;
    ServiceType = 6, "Service-Type", Integer;
    FramedProtocol = 7, "Framed-Protocol", Integer;
    FramedIpAddress = 8, "Framed-IP-Address", Address;
    FramedIpNetmask = 9, "Framed-IP-Netmask", Address;
    FramedRouting = 10, "Framed-Routing", Integer;
    FilterId = 11, "Filter-Id", Text;
    FramedMtu = 12, "Framed-MTU", Integer;
    FramedCompression = 13, "Framed-Compression", Integer;
    LoginIpHost = 14, "Login-IP-Host", Address;
    LoginService = 15, "Login-Service", Integer;
    LoginTcpPort = 16, "Login-TCP-Port", Integer;
    ReplyMessage = 18, "Reply-Message", Text;
    CallbackNumber = 19, "Callback-Number", Text;
    CallbackId = 20, "Callback-Id", Text;
    FramedRoute = 22, "Framed-Route", Text;
    FramedIpxNetwork = 23, "Framed-IPX-Network", Integer;
    /// State (24) - RFC 2865, echoed back unmodified in the next request
    State = 24, "State", Octets;
    Class = 25, "Class", Octets;
    VendorSpecific = 26, "Vendor-Specific", Octets;
    SessionTimeout = 27, "Session-Timeout", Integer;
    IdleTimeout = 28, "Idle-Timeout", Integer;
    TerminationAction = 29, "Termination-Action", Integer;
    CalledStationId = 30, "Called-Station-Id", Text;
    CallingStationId = 31, "Calling-Station-Id", Text;
    NasIdentifier = 32, "NAS-Identifier", Text;
    /// Proxy-State (33) - RFC 2865, copied from request to reply by proxies
    ProxyState = 33, "Proxy-State", Octets;
    LoginLatService = 34, "Login-LAT-Service", Text;
    LoginLatNode = 35, "Login-LAT-Node", Text;
    LoginLatGroup = 36, "Login-LAT-Group", Octets;
    FramedAppleTalkLink = 37, "Framed-AppleTalk-Link", Integer;
    FramedAppleTalkNetwork = 38, "Framed-AppleTalk-Network", Integer;
    FramedAppleTalkZone = 39, "Framed-AppleTalk-Zone", Text;
    /// Acct-Status-Type (40) - RFC 2866
    AcctStatusType = 40, "Acct-Status-Type", Integer;
    AcctDelayTime = 41, "Acct-Delay-Time", Integer;
    AcctInputOctets = 42, "Acct-Input-Octets", Integer;
    AcctOutputOctets = 43, "Acct-Output-Octets", Integer;
    AcctSessionId = 44, "Acct-Session-Id", Text;
    AcctAuthentic = 45, "Acct-Authentic", Integer;
    AcctSessionTime = 46, "Acct-Session-Time", Integer;
    AcctInputPackets = 47, "Acct-Input-Packets", Integer;
    AcctOutputPackets = 48, "Acct-Output-Packets", Integer;
    AcctTerminateCause = 49, "Acct-Terminate-Cause", Integer;
    AcctMultiSessionId = 50, "Acct-Multi-Session-Id", Text;
    AcctLinkCount = 51, "Acct-Link-Count", Integer;
    /// Acct-Input-Gigawords (52) - RFC 2869
    AcctInputGigawords = 52, "Acct-Input-Gigawords", Integer;
    AcctOutputGigawords = 53, "Acct-Output-Gigawords", Integer;
    EventTimestamp = 55, "Event-Timestamp", Integer;
    /// CHAP-Challenge (60) - RFC 2865
    ChapChallenge = 60, "CHAP-Challenge", Octets;
    NasPortType = 61, "NAS-Port-Type", Integer;
    PortLimit = 62, "Port-Limit", Integer;
    LoginLatPort = 63, "Login-LAT-Port", Text;
    /// EAP-Message (79) - RFC 3579
    EapMessage = 79, "EAP-Message", Octets;
    /// Message-Authenticator (80) - RFC 2869
    MessageAuthenticator = 80, "Message-Authenticator", Octets;
    NasPortId = 87, "NAS-Port-Id", Text;
    /// Error-Cause (101) - RFC 5176, carried in CoA/Disconnect NAKs
    ErrorCause = 101, "Error-Cause", Integer;
}

impl AttributeType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
