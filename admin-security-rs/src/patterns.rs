//! Dangerous-pattern denylist
//!
//! An ordered, case-insensitive set of regular expressions covering known
//! injection idioms: SQL/NoSQL keywords, MongoDB `$`-operators, HTML and
//! script markup, shell metacharacters and command names, path traversal
//! sequences, and LDAP metacharacters. Every value accepted by the
//! validator is scanned against the full list before any sanitizer runs;
//! the first matching pattern names the violation.
//!
//! The patterns are heuristic and intentionally broad. Several of them
//! overlap (e.g. more than one matches `<script>`); the list is kept as
//! data so it can be audited and consolidated in one place.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Shell/system command names matched as standalone words.
const COMMAND_NAMES: &str = "rm|del|format|fdisk|mkfs|dd|cat|ls|dir|type|copy|move|ren|mkdir|\
rmdir|chmod|chown|su|sudo|passwd|useradd|userdel|groupadd|groupdel|usermod|groupmod|find|grep|\
awk|sed|perl|python|ruby|bash|sh|zsh|fish|cmd|powershell|wscript|cscript|regsvr32|rundll32|\
mshta|wmic|wsl|curl|wget|ftp|telnet|ssh|scp|rsync|netcat|nc|nmap|ping|traceroute|route|arp|\
iptables|ufw|firewall|systemctl|service|chkconfig|initctl|update-rc|sysv-rc|systemd|upstart|\
inetd|xinetd|cron|at|batch|anacron|logrotate|rsyslog|syslog|journalctl|dmesg|last|lastlog|who|\
w|users|id|groups|getent|shadow|group|gshadow|hosts|hostname|dns|dig|nslookup|host|resolvectl|\
systemd-resolve|netstat|ss|lsof|fuser|ps|top|htop|free|df|du|iostat|vmstat|sar|iotop|kill|\
killall|pkill|pgrep|nice|renice|nohup|screen|tmux|bg|fg|jobs|disown|wait|trap|exit|logout|\
history|alias|unalias|export|unset|env|printenv|set|source";

lazy_static! {
    // SQL keyword patterns
    static ref SQL_KEYWORD_PATTERNS: Vec<String> = vec![
        r"(\s|^)(union|select|insert|update|delete|drop|create|alter|exec|execute|script|javascript|vbscript|onload|onerror|onclick)(\s|;)".to_string(),
        r"(\s|^)(where|from|into|values|set|table|database|schema|index|view|procedure|function|trigger)(\s|;)".to_string(),
        r"(\s|^)(or|and|not|like|regex|exists|is|in|between|having|group|order|limit|offset)(\s|$)".to_string(),
        r"(\s|^)(count|sum|avg|min|max|distinct|top|rownum|rowid|null|empty|match|contains)(\s|$)".to_string(),
    ];

    // MongoDB operator and escape-sequence patterns
    static ref MONGO_SYNTAX_PATTERNS: Vec<String> = vec![
        r"\$(\w+)\s*:".to_string(),
        r"\{\s*\$(\w+)".to_string(),
        r"\$\$(\w+)".to_string(),
        r"\\x[0-9a-fA-F]{2}".to_string(),
        r"null\s*bite".to_string(),
    ];

    // XML and HTML markup patterns
    static ref MARKUP_PATTERNS: Vec<String> = vec![
        r"<[^>]*>".to_string(),
        r"&[a-zA-Z0-9#]+;".to_string(),
        r"<!DOCTYPE".to_string(),
        r"<!ENTITY".to_string(),
        r"<[^>]*script[^>]*>".to_string(),
        r"<[^>]*style[^>]*>".to_string(),
        r"javascript:".to_string(),
        r"vbscript:".to_string(),
        r"data:".to_string(),
    ];

    // XSS patterns
    static ref XSS_PATTERNS: Vec<String> = vec![
        r"on\w+\s*=".to_string(),
        r"<script".to_string(),
        r"</script>".to_string(),
        r"<iframe".to_string(),
        r"</iframe>".to_string(),
        r"<object".to_string(),
        r"<embed".to_string(),
        r"<form".to_string(),
        r"<input".to_string(),
        r"<textarea".to_string(),
        r"<select".to_string(),
        r"<option".to_string(),
        r"<link".to_string(),
        r"<meta".to_string(),
        r"<style".to_string(),
        r"<base".to_string(),
        r"<applet".to_string(),
        r"<frameset".to_string(),
        r"<frame".to_string(),
        r"<body".to_string(),
        r"<head".to_string(),
        r"<html".to_string(),
        r"<title".to_string(),
    ];

    // Command injection patterns: metacharacters, then command names as
    // whole words. The word boundaries are deliberate; without them the
    // short names (at, id, ss) match inside ordinary prose.
    static ref COMMAND_PATTERNS: Vec<String> = vec![
        r"[;&|`$(){}\[\]]".to_string(),
        format!(r"\b({})\b", COMMAND_NAMES),
    ];

    // Path traversal patterns
    static ref PATH_TRAVERSAL_PATTERNS: Vec<String> = vec![
        r"\.\./".to_string(),
        r"\.\.\\".to_string(),
        r"%2e%2e%2f".to_string(),
        r"%2e%2e%5c".to_string(),
        r"\.\.%2f".to_string(),
        r"\.\.%5c".to_string(),
        r"%c0%ae%c0%ae%c0%af".to_string(),
        r"%c1%9c%c1%9c%c1%af".to_string(),
    ];

    // LDAP metacharacter pattern
    static ref LDAP_PATTERNS: Vec<String> = vec![
        r"[=()&|!~*<>]".to_string(),
    ];

    // MongoDB operator names
    static ref MONGO_OPERATOR_PATTERNS: Vec<String> = vec![
        r"\$where".to_string(),
        r"\$regex".to_string(),
        r"\$ne".to_string(),
        r"\$gt".to_string(),
        r"\$gte".to_string(),
        r"\$lt".to_string(),
        r"\$lte".to_string(),
        r"\$in".to_string(),
        r"\$nin".to_string(),
        r"\$exists".to_string(),
        r"\$size".to_string(),
        r"\$all".to_string(),
        r"\$elemMatch".to_string(),
        r"\$not".to_string(),
        r"\$or".to_string(),
        r"\$and".to_string(),
        r"\$nor".to_string(),
        r"\$text".to_string(),
        r"\$search".to_string(),
        r"\$language".to_string(),
        r"\$caseSensitive".to_string(),
        r"\$diacriticSensitive".to_string(),
        r"\$project".to_string(),
        r"\$match".to_string(),
        r"\$group".to_string(),
        r"\$sort".to_string(),
        r"\$limit".to_string(),
        r"\$skip".to_string(),
        r"\$out".to_string(),
        r"\$mapReduce".to_string(),
        r"\$lookup".to_string(),
        r"\$unwind".to_string(),
        r"\$graphLookup".to_string(),
        r"\$facet".to_string(),
        r"\$bucket".to_string(),
        r"\$bucketAuto".to_string(),
        r"\$addFields".to_string(),
        r"\$replaceRoot".to_string(),
        r"\$replaceWith".to_string(),
        r"\$merge".to_string(),
        r"\$unionWith".to_string(),
        r"\$set".to_string(),
        r"\$unset".to_string(),
        r"\$push".to_string(),
        r"\$pull".to_string(),
        r"\$pop".to_string(),
        r"\$inc".to_string(),
        r"\$mul".to_string(),
        r"\$max".to_string(),
        r"\$min".to_string(),
        r"\$currentDate".to_string(),
        r"\$bit".to_string(),
        r"\$rename".to_string(),
        r"\$addToSet".to_string(),
        r"\$each".to_string(),
        r"\$position".to_string(),
        r"\$slice".to_string(),
        r"\$sort\s*:".to_string(),
        r"\$pullAll".to_string(),
        r"\$pushAll".to_string(),
        r"\$isolated".to_string(),
        r"\$natural".to_string(),
    ];

    /// The full denylist in evaluation order, compiled once at startup.
    /// The first matching entry names the violation.
    pub static ref DANGEROUS_PATTERNS: Vec<(String, Regex)> = {
        let groups: [&Vec<String>; 8] = [
            &SQL_KEYWORD_PATTERNS,
            &MONGO_SYNTAX_PATTERNS,
            &MARKUP_PATTERNS,
            &XSS_PATTERNS,
            &COMMAND_PATTERNS,
            &PATH_TRAVERSAL_PATTERNS,
            &LDAP_PATTERNS,
            &MONGO_OPERATOR_PATTERNS,
        ];

        let mut compiled = Vec::new();
        for group in groups {
            for pattern in group.iter() {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .unwrap();
                compiled.push((pattern.clone(), regex));
            }
        }
        compiled
    };
}

/// Scan a value against the full denylist.
///
/// Returns the source of the first matching pattern, or `None` if the
/// value is clean. The scan runs over a lower-cased copy; the patterns
/// are compiled case-insensitively as well.
pub fn first_dangerous_match(value: &str) -> Option<&'static str> {
    let lowered = value.to_lowercase();
    DANGEROUS_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(&lowered))
        .map(|(source, _)| source.as_str())
}
