use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rasterix_image::Image;
use rasterix_imgproc::filter::{
    filter_2d, filter_2d_parallel, kernels, separable_filter,
};

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter2d");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 9, 15].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height * 4).map(|i| (i % 256) as u8).collect();
            let image_size = [*width, *height].into();
            let image = Image::<u8, 4>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<u8, 4>::from_size_val(image_size, 0).unwrap();

            let kernel = kernels::box_blur_kernel(*kernel_size).unwrap();
            let kernel_1d = kernels::box_blur_kernel_1d(*kernel_size);

            group.bench_with_input(
                BenchmarkId::new("filter_2d", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(filter_2d(src, &mut dst, &kernel)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("filter_2d_parallel", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(filter_2d_parallel(src, &mut dst, &kernel)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("separable_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(separable_filter(src, &mut dst, &kernel_1d, &kernel_1d)))
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
