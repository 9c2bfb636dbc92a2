//! Command Builder Tests
//!
//! Argument lists produced by the typed helpers and the generic builder.

use std::io::{self, Cursor, Empty, Sink};

use redpipe::{Command, Config, Connection};

// =============================================================================
// Helper Functions
// =============================================================================

/// Connection whose commands are only inspected, never answered
fn offline_connection() -> Connection<Empty, Sink> {
    Connection::from_parts(io::empty(), io::sink(), &Config::default())
}

fn args_of(cmd: &Command) -> Vec<String> {
    cmd.args()
        .iter()
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect()
}

// =============================================================================
// Generic Builder Tests
// =============================================================================

#[test]
fn test_builder_arguments() {
    let conn = offline_connection();

    let cmd = conn
        .command("SET")
        .arg("key")
        .arg(b"value")
        .arg_if(false, "NX")
        .arg_if(true, "XX")
        .queue();

    assert_eq!(args_of(&cmd), vec!["SET", "key", "value", "XX"]);
    assert_eq!(cmd.name().as_deref(), Some("SET"));
}

#[test]
fn test_builder_args_and_pairs() {
    let conn = offline_connection();

    let cmd = conn
        .command("HSET")
        .arg("h")
        .pairs([("f1", 1), ("f2", 2)])
        .queue();
    assert_eq!(args_of(&cmd), vec!["HSET", "h", "f1", "1", "f2", "2"]);

    let cmd = conn.command("DEL").args(vec!["a", "b", "c"]).queue();
    assert_eq!(args_of(&cmd), vec!["DEL", "a", "b", "c"]);
}

#[test]
fn test_binary_arguments_are_untouched() {
    let conn = offline_connection();

    let cmd = conn.set(&b"k\r\n"[..], vec![0u8, 255]);
    assert_eq!(&cmd.args()[1][..], b"k\r\n");
    assert_eq!(&cmd.args()[2][..], &[0u8, 255][..]);
}

// =============================================================================
// Typed Helper Tests
// =============================================================================

#[test]
fn test_string_helpers() {
    let conn = offline_connection();

    assert_eq!(args_of(&conn.get("k")), vec!["GET", "k"]);
    assert_eq!(args_of(&conn.setex("k", 10, "v")), vec!["SETEX", "k", "10", "v"]);
    assert_eq!(args_of(&conn.incr_by("n", -5)), vec!["INCRBY", "n", "-5"]);
    assert_eq!(
        args_of(&conn.mset([("a", "1"), ("b", "2")])),
        vec!["MSET", "a", "1", "b", "2"]
    );
    assert_eq!(args_of(&conn.mget(["a", "b"])), vec!["MGET", "a", "b"]);
}

#[test]
fn test_key_helpers() {
    let conn = offline_connection();

    assert_eq!(args_of(&conn.del(["a", "b"])), vec!["DEL", "a", "b"]);
    assert_eq!(args_of(&conn.key_type("k")), vec!["TYPE", "k"]);
    assert_eq!(args_of(&conn.expire("k", 30)), vec!["EXPIRE", "k", "30"]);
    assert_eq!(args_of(&conn.rename("a", "b")), vec!["RENAME", "a", "b"]);
}

#[test]
fn test_set_operations_prepend_operation_name() {
    let conn = offline_connection();

    assert_eq!(args_of(&conn.sinter(["s1", "s2"])), vec!["SINTER", "s1", "s2"]);
    assert_eq!(args_of(&conn.sunion(["s1", "s2"])), vec!["SUNION", "s1", "s2"]);
    assert_eq!(args_of(&conn.sdiff(["s1", "s2"])), vec!["SDIFF", "s1", "s2"]);
    assert_eq!(
        args_of(&conn.sinterstore("dst", ["s1", "s2"])),
        vec!["SINTERSTORE", "dst", "s1", "s2"]
    );
    assert_eq!(
        args_of(&conn.sdiffstore("dst", ["s1"])),
        vec!["SDIFFSTORE", "dst", "s1"]
    );
}

#[test]
fn test_sorted_set_scores_keep_fractions() {
    let conn = offline_connection();

    assert_eq!(
        args_of(&conn.zadd("board", 12.5, "ann")),
        vec!["ZADD", "board", "12.5", "ann"]
    );
    assert_eq!(
        args_of(&conn.zincrby("board", -0.25, "ann")),
        vec!["ZINCRBY", "board", "-0.25", "ann"]
    );
    assert_eq!(
        args_of(&conn.zadd("board", 3.0, "bob")),
        vec!["ZADD", "board", "3", "bob"]
    );
}

#[test]
fn test_sorted_set_range_options() {
    let conn = offline_connection();

    assert_eq!(
        args_of(&conn.zrange("z", 0, -1, false)),
        vec!["ZRANGE", "z", "0", "-1"]
    );
    assert_eq!(
        args_of(&conn.zrange("z", 0, -1, true)),
        vec!["ZRANGE", "z", "0", "-1", "WITHSCORES"]
    );
    assert_eq!(
        args_of(&conn.zrangebyscore("z", f64::NEG_INFINITY, 1.5, true, Some((0, 10)))),
        vec!["ZRANGEBYSCORE", "z", "-inf", "1.5", "WITHSCORES", "LIMIT", "0", "10"]
    );
    assert_eq!(
        args_of(&conn.zrangebyscore("z", 0.0, f64::INFINITY, false, None)),
        vec!["ZRANGEBYSCORE", "z", "0", "inf"]
    );
}

#[test]
fn test_sorted_set_store_counts_keys() {
    let conn = offline_connection();

    assert_eq!(
        args_of(&conn.zinterstore("dst", ["a", "b", "c"])),
        vec!["ZINTERSTORE", "dst", "3", "a", "b", "c"]
    );
    assert_eq!(
        args_of(&conn.zunionstore("dst", vec!["a"])),
        vec!["ZUNIONSTORE", "dst", "1", "a"]
    );
}

#[test]
fn test_hash_helpers() {
    let conn = offline_connection();

    assert_eq!(
        args_of(&conn.hset("h", "f", "v")),
        vec!["HSET", "h", "f", "v"]
    );
    assert_eq!(
        args_of(&conn.hmset("h", [("a", "1"), ("b", "2")])),
        vec!["HMSET", "h", "a", "1", "b", "2"]
    );
    assert_eq!(
        args_of(&conn.hmget("h", ["a", "b"])),
        vec!["HMGET", "h", "a", "b"]
    );
    assert_eq!(
        args_of(&conn.hincrby("h", "f", 3)),
        vec!["HINCRBY", "h", "f", "3"]
    );
}

#[test]
fn test_list_and_transaction_helpers() {
    let conn = offline_connection();

    assert_eq!(
        args_of(&conn.lrange("l", 0, -1)),
        vec!["LRANGE", "l", "0", "-1"]
    );
    assert_eq!(args_of(&conn.rpush("l", "x")), vec!["RPUSH", "l", "x"]);
    assert_eq!(args_of(&conn.multi()), vec!["MULTI"]);
    assert_eq!(args_of(&conn.exec()), vec!["EXEC"]);
}

// =============================================================================
// Reply Decoding Tests
// =============================================================================

#[test]
fn test_score_reply_parses_as_float() {
    let replies = b"$4\r\n12.5\r\n$-1\r\n".to_vec();
    let conn = Connection::from_parts(Cursor::new(replies), io::sink(), &Config::default());

    let score = conn.zscore("board", "ann");
    let missing = conn.zscore("board", "nobody");

    assert_eq!(score.result().unwrap().as_f64().unwrap(), 12.5);
    assert!(missing.result().unwrap().is_nil());
}
