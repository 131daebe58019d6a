use criterion::{criterion_group, criterion_main, Criterion};
use namewire::{callable, params, Config, Container, Params};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("container_get_instance", |b| {
        let container = Container::new();
        container.bind_instance("config", 42u32);
        b.iter(|| container.get::<u32>("config").unwrap());
    })
    .bench_function("container_get_transient_factory", |b| {
        let container = Container::new();
        container.bind_factory("answer", callable!(() => Ok(42u32)));
        b.iter(|| container.get::<u32>("answer").unwrap());
    })
    .bench_function("container_get_through_alias", |b| {
        let container = Container::new();
        container.bind_instance("config", 42u32);
        container.alias("config", "settings");
        container.alias("settings", "options");
        b.iter(|| container.get::<u32>("options").unwrap());
    })
    .bench_function("container_invoke_auto_wired", |b| {
        let container = Container::new();
        container.bind_instance("left", 40u32);
        let add = callable!((left: u32, right: u32 = 2) => Ok(*left + *right));
        b.iter(|| container.invoke::<u32>(&add, Params::new()).unwrap());
    })
    .bench_function("container_invoke_explicit_params", |b| {
        let container = Container::new();
        let add = callable!((left: u32, right: u32 = 2) => Ok(*left + *right));
        b.iter(|| container.invoke::<u32>(&add, params! { "left" => 40u32 }).unwrap());
    })
    .bench_function("container_setup", |b| {
        b.iter(|| {
            let container = Container::new();
            container.bind_instance("config", 42u32);
            container.bind_factory_with_config("answer", callable!(() => Ok(42u32)), Config { singleton: true });
            container.alias("answer", "result");
            container
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
