//! Well-known service names for TCP ports.
//!
//! This is a registry lookup for display only; nothing is sent to the port
//! to confirm what is actually listening there.

/// Sorted by port so lookups can binary search.
static WELL_KNOWN: &[(u16, &str)] = &[
    (20, "ftp-data"),
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (53, "domain"),
    (80, "http"),
    (88, "kerberos"),
    (110, "pop3"),
    (111, "rpcbind"),
    (119, "nntp"),
    (135, "msrpc"),
    (139, "netbios-ssn"),
    (143, "imap"),
    (179, "bgp"),
    (389, "ldap"),
    (443, "https"),
    (445, "microsoft-ds"),
    (465, "smtps"),
    (514, "shell"),
    (548, "afp"),
    (554, "rtsp"),
    (587, "submission"),
    (631, "ipp"),
    (636, "ldaps"),
    (873, "rsync"),
    (993, "imaps"),
    (995, "pop3s"),
    (1080, "socks"),
    (1433, "mssql"),
    (1521, "oracle"),
    (1723, "pptp"),
    (1883, "mqtt"),
    (2049, "nfs"),
    (2181, "zookeeper"),
    (2375, "docker"),
    (2376, "docker-tls"),
    (3000, "ppp"),
    (3128, "squid-http"),
    (3306, "mysql"),
    (3389, "ms-wbt-server"),
    (5000, "upnp"),
    (5060, "sip"),
    (5432, "postgresql"),
    (5672, "amqp"),
    (5900, "vnc"),
    (6379, "redis"),
    (6443, "kubernetes-api"),
    (6667, "irc"),
    (8000, "http-alt"),
    (8008, "http"),
    (8080, "http-proxy"),
    (8443, "https-alt"),
    (8888, "sun-answerbook"),
    (9000, "cslistener"),
    (9090, "zeus-admin"),
    (9092, "kafka"),
    (9200, "elasticsearch"),
    (11211, "memcache"),
    (27017, "mongod"),
];

/// Look up the registered service name for a TCP port.
pub fn service_name(port: u16) -> Option<&'static str> {
    WELL_KNOWN
        .binary_search_by_key(&port, |&(p, _)| p)
        .ok()
        .map(|i| WELL_KNOWN[i].1)
}

/// Like [`service_name`], with `"unknown"` for unregistered ports.
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(WELL_KNOWN.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_common_ports() {
        assert_eq!(service_name(22), Some("ssh"));
        assert_eq!(service_name(80), Some("http"));
        assert_eq!(service_name(443), Some("https"));
        assert_eq!(service_name(8000), Some("http-alt"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(service_name(7999), None);
        assert_eq!(service_label(7999), "unknown");
    }
}
