use crate::{
    error::RankError,
    invariants::{ClientIp, OctetRank},
};

const OCTET_WIDTH: usize = 3;

/// Zero-pads each octet to three digits and concatenates them, so
/// `10.0.0.1` becomes `010000000001`.
///
/// Octets that are empty or already wider than three characters are
/// appended as-is, which can break IPv4 ordering for malformed addresses.
pub fn combine_octets<'a, I>(octets: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut digits = String::with_capacity(4 * OCTET_WIDTH);
    for octet in octets {
        if (1..OCTET_WIDTH).contains(&octet.len()) {
            digits.extend(std::iter::repeat_n('0', OCTET_WIDTH - octet.len()));
        }
        digits.push_str(octet);
    }
    digits
}

pub fn octet_rank(ip: &ClientIp) -> Result<OctetRank, RankError> {
    let digits = combine_octets(ip.octets());
    match digits.parse::<u64>() {
        Ok(value) => Ok(value.into()),
        Err(source) => Err(RankError {
            ip: ip.to_string(),
            digits,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    fn rank(ip: &str) -> u64 {
        octet_rank(&ClientIp::from(ip)).unwrap().get()
    }

    #[test]
    fn pads_each_octet() {
        assert_eq!(rank("10.0.0.1"), 10_000_000_001);
        assert_eq!(rank("9.255.255.255"), 9_255_255_255);
        assert_eq!(rank("123.45.6.78"), 123_045_006_078);
    }

    #[test]
    fn combines_padded_octets() {
        assert_that!(combine_octets(["5", "23", "123", "0"]))
            .is_equal_to("005023123000".to_string());
    }

    #[test]
    fn follows_ipv4_ordering() {
        let ordered = [
            "0.0.0.0",
            "0.0.0.9",
            "0.0.1.0",
            "9.255.255.255",
            "10.0.0.1",
            "10.0.0.10",
            "192.168.1.2",
            "255.255.255.255",
        ];
        for pair in ordered.windows(2) {
            assert_that!(rank(pair[0])).is_less_than(rank(pair[1]));
        }
    }

    #[test]
    fn wide_octets_pass_through_unpadded() {
        assert_eq!(rank("1000.0.0.1"), 1_000_000_000_001);
    }

    #[test]
    fn empty_octet_is_not_padded() {
        assert_eq!(rank("1..2.3"), 1_002_003);
    }

    #[test]
    fn non_numeric_octet_fails() {
        let err = octet_rank(&ClientIp::from("10.0.0.x")).unwrap_err();
        assert_that!(err.digits.as_str()).is_equal_to("01000000000x");
        assert_that!(octet_rank(&ClientIp::from("-"))).is_err();
    }
}
