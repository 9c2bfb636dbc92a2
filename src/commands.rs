//! Command Builders
//!
//! Typed helpers that queue common operations on a [`Connection`].
//!
//! Each helper only assembles the argument list (operation name first) and
//! queues it; nothing is sent until a result is read or the connection
//! flushes. Keys and values accept anything implementing [`ToArg`]. Anything
//! not covered here can be queued with [`Connection::command`].

use std::io::{Read, Write};

use crate::network::{Command, Connection};
use crate::protocol::ToArg;

impl<R: Read + 'static, W: Write + 'static> Connection<R, W> {
    // =========================================================================
    // Connection Handling
    // =========================================================================

    pub fn ping(&self) -> Command {
        self.command("PING").queue()
    }

    pub fn echo(&self, message: impl ToArg) -> Command {
        self.command("ECHO").arg(message).queue()
    }

    pub fn auth(&self, password: impl ToArg) -> Command {
        self.command("AUTH").arg(password).queue()
    }

    pub fn select(&self, index: i64) -> Command {
        self.command("SELECT").arg(index).queue()
    }

    pub fn quit(&self) -> Command {
        self.command("QUIT").queue()
    }

    // =========================================================================
    // Keys
    // =========================================================================

    pub fn exists(&self, key: impl ToArg) -> Command {
        self.command("EXISTS").arg(key).queue()
    }

    pub fn del<I>(&self, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("DEL").args(keys).queue()
    }

    /// `TYPE key`
    pub fn key_type(&self, key: impl ToArg) -> Command {
        self.command("TYPE").arg(key).queue()
    }

    pub fn keys(&self, pattern: impl ToArg) -> Command {
        self.command("KEYS").arg(pattern).queue()
    }

    pub fn rename(&self, old_key: impl ToArg, new_key: impl ToArg) -> Command {
        self.command("RENAME").arg(old_key).arg(new_key).queue()
    }

    pub fn expire(&self, key: impl ToArg, seconds: i64) -> Command {
        self.command("EXPIRE").arg(key).arg(seconds).queue()
    }

    pub fn ttl(&self, key: impl ToArg) -> Command {
        self.command("TTL").arg(key).queue()
    }

    pub fn dbsize(&self) -> Command {
        self.command("DBSIZE").queue()
    }

    pub fn flushdb(&self) -> Command {
        self.command("FLUSHDB").queue()
    }

    // =========================================================================
    // Strings
    // =========================================================================

    pub fn get(&self, key: impl ToArg) -> Command {
        self.command("GET").arg(key).queue()
    }

    pub fn set(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("SET").arg(key).arg(value).queue()
    }

    pub fn setex(&self, key: impl ToArg, seconds: i64, value: impl ToArg) -> Command {
        self.command("SETEX").arg(key).arg(seconds).arg(value).queue()
    }

    pub fn setnx(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("SETNX").arg(key).arg(value).queue()
    }

    pub fn getset(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("GETSET").arg(key).arg(value).queue()
    }

    pub fn mget<I>(&self, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("MGET").args(keys).queue()
    }

    pub fn mset<I, K, V>(&self, pairs: I) -> Command
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToArg,
        V: ToArg,
    {
        self.command("MSET").pairs(pairs).queue()
    }

    pub fn incr(&self, key: impl ToArg) -> Command {
        self.command("INCR").arg(key).queue()
    }

    pub fn incr_by(&self, key: impl ToArg, delta: i64) -> Command {
        self.command("INCRBY").arg(key).arg(delta).queue()
    }

    pub fn decr(&self, key: impl ToArg) -> Command {
        self.command("DECR").arg(key).queue()
    }

    pub fn decr_by(&self, key: impl ToArg, delta: i64) -> Command {
        self.command("DECRBY").arg(key).arg(delta).queue()
    }

    pub fn append(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("APPEND").arg(key).arg(value).queue()
    }

    // =========================================================================
    // Lists
    // =========================================================================

    pub fn lpush(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("LPUSH").arg(key).arg(value).queue()
    }

    pub fn rpush(&self, key: impl ToArg, value: impl ToArg) -> Command {
        self.command("RPUSH").arg(key).arg(value).queue()
    }

    pub fn llen(&self, key: impl ToArg) -> Command {
        self.command("LLEN").arg(key).queue()
    }

    pub fn lrange(&self, key: impl ToArg, start: i64, stop: i64) -> Command {
        self.command("LRANGE").arg(key).arg(start).arg(stop).queue()
    }

    pub fn ltrim(&self, key: impl ToArg, start: i64, stop: i64) -> Command {
        self.command("LTRIM").arg(key).arg(start).arg(stop).queue()
    }

    pub fn lindex(&self, key: impl ToArg, index: i64) -> Command {
        self.command("LINDEX").arg(key).arg(index).queue()
    }

    pub fn lpop(&self, key: impl ToArg) -> Command {
        self.command("LPOP").arg(key).queue()
    }

    pub fn rpop(&self, key: impl ToArg) -> Command {
        self.command("RPOP").arg(key).queue()
    }

    // =========================================================================
    // Sets
    // =========================================================================

    pub fn sadd(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("SADD").arg(key).arg(member).queue()
    }

    pub fn srem(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("SREM").arg(key).arg(member).queue()
    }

    pub fn scard(&self, key: impl ToArg) -> Command {
        self.command("SCARD").arg(key).queue()
    }

    pub fn smembers(&self, key: impl ToArg) -> Command {
        self.command("SMEMBERS").arg(key).queue()
    }

    pub fn sismember(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("SISMEMBER").arg(key).arg(member).queue()
    }

    pub fn sinter<I>(&self, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SINTER").args(keys).queue()
    }

    pub fn sunion<I>(&self, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SUNION").args(keys).queue()
    }

    pub fn sdiff<I>(&self, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SDIFF").args(keys).queue()
    }

    pub fn sinterstore<I>(&self, destination: impl ToArg, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SINTERSTORE").arg(destination).args(keys).queue()
    }

    pub fn sunionstore<I>(&self, destination: impl ToArg, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SUNIONSTORE").arg(destination).args(keys).queue()
    }

    pub fn sdiffstore<I>(&self, destination: impl ToArg, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("SDIFFSTORE").arg(destination).args(keys).queue()
    }

    // =========================================================================
    // Sorted Sets
    // =========================================================================

    pub fn zadd(&self, key: impl ToArg, score: f64, member: impl ToArg) -> Command {
        self.command("ZADD").arg(key).arg(score).arg(member).queue()
    }

    pub fn zincrby(&self, key: impl ToArg, increment: f64, member: impl ToArg) -> Command {
        self.command("ZINCRBY").arg(key).arg(increment).arg(member).queue()
    }

    pub fn zrem(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("ZREM").arg(key).arg(member).queue()
    }

    pub fn zscore(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("ZSCORE").arg(key).arg(member).queue()
    }

    pub fn zrank(&self, key: impl ToArg, member: impl ToArg) -> Command {
        self.command("ZRANK").arg(key).arg(member).queue()
    }

    pub fn zcard(&self, key: impl ToArg) -> Command {
        self.command("ZCARD").arg(key).queue()
    }

    pub fn zrange(&self, key: impl ToArg, start: i64, stop: i64, with_scores: bool) -> Command {
        self.command("ZRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .arg_if(with_scores, "WITHSCORES")
            .queue()
    }

    /// `ZRANGEBYSCORE key min max [WITHSCORES] [LIMIT offset count]`
    pub fn zrangebyscore(
        &self,
        key: impl ToArg,
        min: f64,
        max: f64,
        with_scores: bool,
        limit: Option<(i64, i64)>,
    ) -> Command {
        let builder = self
            .command("ZRANGEBYSCORE")
            .arg(key)
            .arg(min)
            .arg(max)
            .arg_if(with_scores, "WITHSCORES");
        match limit {
            Some((offset, count)) => builder.arg("LIMIT").arg(offset).arg(count).queue(),
            None => builder.queue(),
        }
    }

    pub fn zinterstore<I>(&self, destination: impl ToArg, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
        I::IntoIter: ExactSizeIterator,
    {
        let keys = keys.into_iter();
        self.command("ZINTERSTORE")
            .arg(destination)
            .arg(keys.len())
            .args(keys)
            .queue()
    }

    pub fn zunionstore<I>(&self, destination: impl ToArg, keys: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
        I::IntoIter: ExactSizeIterator,
    {
        let keys = keys.into_iter();
        self.command("ZUNIONSTORE")
            .arg(destination)
            .arg(keys.len())
            .args(keys)
            .queue()
    }

    // =========================================================================
    // Hashes
    // =========================================================================

    pub fn hset(&self, key: impl ToArg, field: impl ToArg, value: impl ToArg) -> Command {
        self.command("HSET").arg(key).arg(field).arg(value).queue()
    }

    pub fn hget(&self, key: impl ToArg, field: impl ToArg) -> Command {
        self.command("HGET").arg(key).arg(field).queue()
    }

    pub fn hmset<I, K, V>(&self, key: impl ToArg, pairs: I) -> Command
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToArg,
        V: ToArg,
    {
        self.command("HMSET").arg(key).pairs(pairs).queue()
    }

    pub fn hmget<I>(&self, key: impl ToArg, fields: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.command("HMGET").arg(key).args(fields).queue()
    }

    pub fn hdel(&self, key: impl ToArg, field: impl ToArg) -> Command {
        self.command("HDEL").arg(key).arg(field).queue()
    }

    pub fn hexists(&self, key: impl ToArg, field: impl ToArg) -> Command {
        self.command("HEXISTS").arg(key).arg(field).queue()
    }

    pub fn hlen(&self, key: impl ToArg) -> Command {
        self.command("HLEN").arg(key).queue()
    }

    pub fn hkeys(&self, key: impl ToArg) -> Command {
        self.command("HKEYS").arg(key).queue()
    }

    pub fn hvals(&self, key: impl ToArg) -> Command {
        self.command("HVALS").arg(key).queue()
    }

    pub fn hgetall(&self, key: impl ToArg) -> Command {
        self.command("HGETALL").arg(key).queue()
    }

    pub fn hincrby(&self, key: impl ToArg, field: impl ToArg, delta: i64) -> Command {
        self.command("HINCRBY").arg(key).arg(field).arg(delta).queue()
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub fn multi(&self) -> Command {
        self.command("MULTI").queue()
    }

    pub fn exec(&self) -> Command {
        self.command("EXEC").queue()
    }

    pub fn discard(&self) -> Command {
        self.command("DISCARD").queue()
    }

    // =========================================================================
    // Server
    // =========================================================================

    pub fn info(&self) -> Command {
        self.command("INFO").queue()
    }

    pub fn publish(&self, channel: impl ToArg, message: impl ToArg) -> Command {
        self.command("PUBLISH").arg(channel).arg(message).queue()
    }
}
