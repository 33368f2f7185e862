//! Flow description parsing and flow list building
//!
//! Flow-Description AVPs carry IPFilterRule strings (RFC 6733 section 4.3):
//! `<permit|deny> <out|in> <proto> from <src> [<ports>] to <dst> [<ports>]`
//!
//! Examples:
//! - `permit out ip from any to any`
//! - `permit out 17 from 10.0.0.1 to 192.168.1.1 80`
//! - `deny in tcp from 2001:db8::/32 8000-8080 to assigned`

use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{FlowError, FlowResult};
use crate::gx::FlowInformation;
use crate::policy::{FlowAction, FlowDescription, FlowDirection, FlowMatch, IpPrefix, PortRange};

/// Turns one flow description string into its structured form
///
/// Failure is per string: a parser must not keep state between calls.
pub trait FlowParser: Send + Sync {
    fn parse(&self, flow_description: &str) -> FlowResult<FlowDescription>;
}

impl<F> FlowParser for F
where
    F: Fn(&str) -> FlowResult<FlowDescription> + Send + Sync,
{
    fn parse(&self, flow_description: &str) -> FlowResult<FlowDescription> {
        self(flow_description)
    }
}

/// IPFilterRule parser used by default
#[derive(Debug, Clone, Copy, Default)]
pub struct IpFilterRuleParser;

impl FlowParser for IpFilterRuleParser {
    fn parse(&self, flow_description: &str) -> FlowResult<FlowDescription> {
        compile_flow_description(flow_description)
    }
}

/// Build the flow list of a rule
///
/// Explicit Flow-Description strings come first, then the strings carried in
/// Flow-Information AVPs. Strings that fail to parse are logged and dropped;
/// survivors keep their relative order.
pub fn build_flow_list(
    parser: &dyn FlowParser,
    flow_descriptions: &[String],
    flow_informations: &[FlowInformation],
) -> Vec<FlowDescription> {
    flow_descriptions
        .iter()
        .map(String::as_str)
        .chain(flow_informations.iter().map(|info| info.flow_description.as_str()))
        .filter_map(|flow_string| match parser.parse(flow_string) {
            Ok(flow) => Some(flow),
            Err(e) => {
                log::error!("Could not get flow for description {flow_string}: {e}");
                None
            }
        })
        .collect()
}

/// Compile an IPFilterRule string into a flow description
pub fn compile_flow_description(flow_description: &str) -> FlowResult<FlowDescription> {
    let tokens: Vec<&str> = flow_description.split_whitespace().collect();

    if tokens.is_empty() {
        return Err(FlowError::InvalidSyntax("Empty flow description".to_string()));
    }

    let action = parse_action(tokens[0])?;

    let direction = match tokens.get(1) {
        Some(&dir) => parse_direction(dir)?,
        None => return Err(FlowError::InvalidSyntax("Missing direction".to_string())),
    };

    let ip_proto = match tokens.get(2) {
        Some(&proto) => parse_protocol(proto)?,
        None => return Err(FlowError::InvalidSyntax("Missing protocol".to_string())),
    };

    let from_idx = tokens
        .iter()
        .position(|&t| t == "from")
        .ok_or_else(|| FlowError::MissingKeyword("from".to_string()))?;
    let to_idx = tokens
        .iter()
        .position(|&t| t == "to")
        .ok_or_else(|| FlowError::MissingKeyword("to".to_string()))?;
    if from_idx != 3 || to_idx < from_idx {
        return Err(FlowError::InvalidSyntax(flow_description.to_string()));
    }

    let (ip_src, src_port) = parse_address_port(&tokens[from_idx + 1..to_idx])?;
    let (ip_dst, dst_port) = parse_address_port(&tokens[to_idx + 1..])?;

    Ok(FlowDescription {
        flow_match: FlowMatch {
            direction,
            ip_proto,
            ip_src,
            ip_dst,
            src_port,
            dst_port,
        },
        action,
    })
}

fn parse_action(action: &str) -> FlowResult<FlowAction> {
    match action {
        "permit" => Ok(FlowAction::Permit),
        "deny" => Ok(FlowAction::Deny),
        _ => Err(FlowError::InvalidAction(action.to_string())),
    }
}

fn parse_direction(direction: &str) -> FlowResult<FlowDirection> {
    match direction {
        "out" => Ok(FlowDirection::Uplink),
        "in" => Ok(FlowDirection::Downlink),
        _ => Err(FlowError::InvalidDirection(direction.to_string())),
    }
}

fn parse_protocol(proto: &str) -> FlowResult<u8> {
    match proto.to_lowercase().as_str() {
        "ip" => Ok(0),
        "icmp" => Ok(1),
        "tcp" => Ok(6),
        "udp" => Ok(17),
        "icmpv6" | "ipv6-icmp" => Ok(58),
        _ => proto
            .parse::<u8>()
            .map_err(|_| FlowError::InvalidProtocol(proto.to_string())),
    }
}

fn parse_address_port(tokens: &[&str]) -> FlowResult<(Option<IpPrefix>, Option<PortRange>)> {
    let (addr_str, rest) = match tokens.split_first() {
        Some((first, rest)) => (*first, rest),
        None => return Err(FlowError::InvalidSyntax("Missing address".to_string())),
    };

    // "any" and "assigned" leave the address unconstrained
    let addr = match addr_str {
        "any" | "assigned" => None,
        _ => Some(parse_address(addr_str)?),
    };

    let port = match rest {
        [] => None,
        [port_str] => Some(parse_port(port_str)?),
        _ => return Err(FlowError::InvalidSyntax(tokens.join(" "))),
    };

    Ok((addr, port))
}

fn parse_address(addr_str: &str) -> FlowResult<IpPrefix> {
    let invalid = || FlowError::InvalidAddress(addr_str.to_string());

    let (addr_part, prefix_len) = match addr_str.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix.parse::<u8>().map_err(|_| invalid())?)),
        None => (addr_str, None),
    };

    let addr = IpAddr::from_str(addr_part).map_err(|_| invalid())?;
    let max_len = if addr.is_ipv4() { 32 } else { 128 };
    let prefix_len = prefix_len.unwrap_or(max_len);
    if prefix_len > max_len {
        return Err(invalid());
    }

    Ok(IpPrefix { addr, prefix_len })
}

fn parse_port(port_str: &str) -> FlowResult<PortRange> {
    let invalid = || FlowError::InvalidPort(port_str.to_string());

    match port_str.split_once('-') {
        Some((low, high)) => {
            let low: u16 = low.parse().map_err(|_| invalid())?;
            let high: u16 = high.parse().map_err(|_| invalid())?;
            if low > high {
                return Err(invalid());
            }
            Ok(PortRange::range(low, high))
        }
        None => port_str.parse().map(PortRange::single).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_compile_permit_any() {
        let flow = compile_flow_description("permit out ip from any to any").unwrap();
        assert_eq!(flow.action, FlowAction::Permit);
        assert_eq!(flow.flow_match.direction, FlowDirection::Uplink);
        assert_eq!(flow.flow_match.ip_proto, 0);
        assert!(flow.flow_match.ip_src.is_none());
        assert!(flow.flow_match.ip_dst.is_none());
    }

    #[test]
    fn test_compile_with_addresses_and_ports() {
        let flow =
            compile_flow_description("permit out 17 from 10.0.0.1 to 192.168.1.0/24 80").unwrap();
        assert_eq!(flow.flow_match.ip_proto, 17);
        assert_eq!(
            flow.flow_match.ip_src,
            Some(IpPrefix {
                addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
                prefix_len: 32,
            })
        );
        assert_eq!(
            flow.flow_match.ip_dst,
            Some(IpPrefix {
                addr: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 0)),
                prefix_len: 24,
            })
        );
        assert!(flow.flow_match.src_port.is_none());
        assert_eq!(flow.flow_match.dst_port, Some(PortRange::single(80)));
    }

    #[test]
    fn test_compile_deny_downlink_ipv6_port_range() {
        let flow =
            compile_flow_description("deny in tcp from 2001:db8::/32 8000-8080 to assigned").unwrap();
        assert_eq!(flow.action, FlowAction::Deny);
        assert_eq!(flow.flow_match.direction, FlowDirection::Downlink);
        assert_eq!(flow.flow_match.ip_proto, 6);
        assert_eq!(
            flow.flow_match.ip_src,
            Some(IpPrefix {
                addr: IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0)),
                prefix_len: 32,
            })
        );
        assert_eq!(flow.flow_match.src_port, Some(PortRange::range(8000, 8080)));
        assert!(flow.flow_match.ip_dst.is_none());
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            compile_flow_description(""),
            Err(FlowError::InvalidSyntax(_))
        ));
        assert!(matches!(
            compile_flow_description("allow out ip from any to any"),
            Err(FlowError::InvalidAction(_))
        ));
        assert!(matches!(
            compile_flow_description("permit up ip from any to any"),
            Err(FlowError::InvalidDirection(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out foo from any to any"),
            Err(FlowError::InvalidProtocol(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out ip any to any"),
            Err(FlowError::MissingKeyword(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out ip from 10.0.0.300 to any"),
            Err(FlowError::InvalidAddress(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out ip from 10.0.0.1/33 to any"),
            Err(FlowError::InvalidAddress(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out ip from any 90-80 to any"),
            Err(FlowError::InvalidPort(_))
        ));
        assert!(matches!(
            compile_flow_description("permit out ip from any to"),
            Err(FlowError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn test_build_flow_list_drops_unparsable_and_keeps_order() {
        let explicit = vec![
            "permit out ip from 10.0.0.1 to any".to_string(),
            "bad".to_string(),
            "permit out ip from 10.0.0.2 to any".to_string(),
        ];
        let derived = vec![FlowInformation {
            flow_description: "permit out ip from 10.0.0.3 to any".to_string(),
        }];

        let flows = build_flow_list(&IpFilterRuleParser, &explicit, &derived);
        assert_eq!(flows.len(), 3);

        let sources: Vec<_> = flows
            .iter()
            .map(|f| f.flow_match.ip_src.map(|p| p.addr))
            .collect();
        assert_eq!(
            sources,
            vec![
                Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
                Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))),
                Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3))),
            ]
        );
    }

    #[test]
    fn test_build_flow_list_with_closure_parser() {
        let parser = |s: &str| -> FlowResult<FlowDescription> {
            if s.starts_with('s') {
                Ok(FlowDescription {
                    flow_match: FlowMatch {
                        ip_proto: s[1..].parse().unwrap_or(0),
                        ..Default::default()
                    },
                    action: FlowAction::Permit,
                })
            } else {
                Err(FlowError::InvalidSyntax(s.to_string()))
            }
        };

        let flows = build_flow_list(&parser, &["s1".to_string(), "x".to_string()], &[]);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].flow_match.ip_proto, 1);
    }

    #[test]
    fn test_build_flow_list_empty() {
        assert!(build_flow_list(&IpFilterRuleParser, &[], &[]).is_empty());
    }
}
