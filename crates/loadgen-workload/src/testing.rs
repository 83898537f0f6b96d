//! An in-memory stand-in for a Redis server, for driving workloads in unit tests.
//!
//! Only the commands the workloads send are understood. Every command is
//! recorded together with its reply, so tests can assert on the exact
//! sequence a workload issued.

use redis::aio::ConnectionLike;
use redis::{Arg, Cmd, ErrorKind, Pipeline, RedisError, RedisFuture, RedisResult, Value};
use std::collections::{HashMap, VecDeque};

/// One command as sent by a workload, and what the fake answered.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub args: Vec<String>,
    pub reply: Value,
}

impl Recorded {
    pub fn name(&self) -> &str {
        &self.args[0]
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeRedis {
    pub strings: HashMap<String, String>,
    pub ttls: HashMap<String, u64>,
    pub hashes: HashMap<String, HashMap<String, String>>,
    pub lists: HashMap<String, VecDeque<String>>,
    pub published: Vec<(String, String)>,
    pub log: Vec<Recorded>,
    fail_on: Option<String>,
}

fn bulk(s: &str) -> Value {
    Value::BulkString(s.as_bytes().to_vec())
}

fn reply_error(msg: &'static str) -> RedisError {
    RedisError::from((ErrorKind::ResponseError, msg))
}

impl FakeRedis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose name starts with `command` with an I/O error.
    pub fn failing_on(command: &str) -> Self {
        Self {
            fail_on: Some(command.to_ascii_uppercase()),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<&str> {
        self.log.iter().map(|r| r.name()).collect()
    }

    fn execute(&mut self, cmd: &Cmd) -> RedisResult<Value> {
        let mut args: Vec<String> = cmd
            .args_iter()
            .filter_map(|arg| match arg {
                Arg::Simple(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
                Arg::Cursor => None,
            })
            .collect();
        let Some(name) = args.first_mut() else {
            return Err(reply_error("empty command"));
        };
        name.make_ascii_uppercase();

        if self
            .fail_on
            .as_deref()
            .is_some_and(|prefix| args[0].starts_with(prefix))
        {
            return Err(RedisError::from((ErrorKind::IoError, "connection reset")));
        }

        let reply = self.apply(&args)?;
        self.log.push(Recorded {
            args,
            reply: reply.clone(),
        });
        Ok(reply)
    }

    fn apply(&mut self, args: &[String]) -> RedisResult<Value> {
        let reply = match args {
            [name, key, value] if name == "SET" => {
                self.strings.insert(key.clone(), value.clone());
                self.ttls.remove(key);
                Value::Okay
            }
            [name, key, secs, value] if name == "SETEX" => self.set_with_ttl(key, value, secs)?,
            [name, key, value, ex, secs] if name == "SET" && ex.eq_ignore_ascii_case("EX") => {
                self.set_with_ttl(key, value, secs)?
            }
            [name, key] if name == "GET" => self.strings.get(key).map_or(Value::Nil, |v| bulk(v)),
            [name, key] if name == "INCR" => self.incr(key, 1)?,
            [name, key, delta] if name == "INCRBY" => {
                let delta = delta.parse().map_err(|_| reply_error("not an integer"))?;
                self.incr(key, delta)?
            }
            [name, keys @ ..] if name == "DEL" && !keys.is_empty() => {
                let mut removed = 0;
                for key in keys {
                    let existed = self.strings.remove(key).is_some()
                        | self.hashes.remove(key).is_some()
                        | self.lists.remove(key).is_some();
                    self.ttls.remove(key);
                    removed += i64::from(existed);
                }
                Value::Int(removed)
            }
            [name, key, pairs @ ..]
                if (name == "HSET" || name == "HMSET") && !pairs.is_empty() && pairs.len() % 2 == 0 =>
            {
                let hash = self.hashes.entry(key.clone()).or_default();
                let mut added = 0;
                for pair in pairs.chunks(2) {
                    if hash.insert(pair[0].clone(), pair[1].clone()).is_none() {
                        added += 1;
                    }
                }
                if name == "HMSET" {
                    Value::Okay
                } else {
                    Value::Int(added)
                }
            }
            [name, key] if name == "HGETALL" => {
                let fields = self.hashes.get(key).cloned().unwrap_or_default();
                Value::Array(
                    fields
                        .iter()
                        .flat_map(|(field, value)| [bulk(field), bulk(value)])
                        .collect(),
                )
            }
            [name, key, values @ ..] if name == "LPUSH" && !values.is_empty() => {
                let list = self.lists.entry(key.clone()).or_default();
                for value in values {
                    list.push_front(value.clone());
                }
                Value::Int(list.len() as i64)
            }
            [name, key] if name == "RPOP" => {
                let popped = self.lists.get_mut(key).and_then(|list| list.pop_back());
                if self.lists.get(key).is_some_and(|list| list.is_empty()) {
                    self.lists.remove(key);
                }
                popped.map_or(Value::Nil, |v| bulk(&v))
            }
            [name, channel, message] if name == "PUBLISH" => {
                self.published.push((channel.clone(), message.clone()));
                Value::Int(0)
            }
            _ => return Err(reply_error("unsupported command")),
        };
        Ok(reply)
    }

    fn set_with_ttl(&mut self, key: &str, value: &str, secs: &str) -> RedisResult<Value> {
        let secs = secs.parse().map_err(|_| reply_error("invalid expire"))?;
        self.strings.insert(key.to_string(), value.to_string());
        self.ttls.insert(key.to_string(), secs);
        Ok(Value::Okay)
    }

    fn incr(&mut self, key: &str, delta: i64) -> RedisResult<Value> {
        let current: i64 = match self.strings.get(key) {
            Some(v) => v.parse().map_err(|_| reply_error("not an integer"))?,
            None => 0,
        };
        let next = current + delta;
        self.strings.insert(key.to_string(), next.to_string());
        Ok(Value::Int(next))
    }

    fn execute_pipeline(&mut self, pipeline: &Pipeline, offset: usize) -> RedisResult<Vec<Value>> {
        let mut replies = Vec::new();
        for cmd in pipeline.cmd_iter() {
            replies.push(self.execute(cmd)?);
        }
        // A transaction answers with a single EXEC reply wrapping every result.
        if offset > 0 {
            Ok(vec![Value::Array(replies)])
        } else {
            Ok(replies)
        }
    }
}

impl ConnectionLike for FakeRedis {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        let result = self.execute(cmd);
        Box::pin(async move { result })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        pipeline: &'a Pipeline,
        offset: usize,
        _count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        let result = self.execute_pipeline(pipeline, offset);
        Box::pin(async move { result })
    }

    fn get_db(&self) -> i64 {
        0
    }
}
