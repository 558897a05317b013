use std::io;

use portal_chess::driver::Driver;

fn main() -> anyhow::Result<()> {
    portal_chess::print_build_info();
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Driver::new(&mut input, &mut output).run()
}
