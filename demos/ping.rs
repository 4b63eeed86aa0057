use std::net::Ipv4Addr;
use std::thread::sleep;
use std::time::Duration;
use anyhow::Result;
use gumdrop::Options;
use icmprobe::{Bind, Ping, Prober};

#[derive(Debug, Options)]
pub struct Args {
    #[options()]                 help:   bool,
    #[options(default = "4")]    count:  usize,
    #[options(default = "500")]  delay:  u64,
    #[options(default = "1000")] expiry: u64,
    #[options(default = "32")]   size:   usize,
    #[options(no_short)]         strict: bool,
    #[options()]                 bind:   Option<Ipv4Addr>,
    #[options(free, required)]   host:   String,
}

fn main() -> Result<()> {
    let args = Args::parse_args_default_or_exit();
    let Args { count, delay, expiry, size, strict, bind, host, .. } = args;

    env_logger::init();

    let delay = Duration::from_millis(delay);

    let mut ping = Ping::new(&host, size, expiry);
    ping.strict = strict;
    ping.bind   = bind.map(Bind::from).unwrap_or_default();

    println!("pinging {} with {} bytes", host, size);

    let mut prober = Prober::from(ping);

    for n in 0..count {
        match prober.send() {
            Ok(d)                    => println!("seq {} RTT {:0.2?} ", n, d),
            Err(e) if e.is_timeout() => println!("seq {} timeout", n),
            Err(e)                   => println!("seq {} error: {}", n, e),
        }
        sleep(delay);
    }

    prober.close();

    Ok(())
}
